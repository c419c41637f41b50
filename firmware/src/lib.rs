// This module is only used as an entry point for unit testing.
#![cfg_attr(not(test), no_std)]

#[cfg(test)]
mod errors;
