/*!
Small, broadly-reusable utilities that don't belong to any one subsystem.
*/

pub mod rng;
