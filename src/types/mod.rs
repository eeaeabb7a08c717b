/*!
Shared types used throughout the library, chiefly [errors](err).
*/

pub mod err;
