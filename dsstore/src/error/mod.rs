/*!
 Errors that can happen when decoding containers or interpreting their fields.
*/

pub mod dsstore;
pub mod field;
pub mod plist;
