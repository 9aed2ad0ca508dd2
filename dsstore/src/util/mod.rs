/*!
 This module defines the container decoder and the utilities used to interpret its values.
*/

pub mod bud1;
pub mod dates;
pub mod plist;
