pub mod fingerprint;
pub mod fs_utils;
