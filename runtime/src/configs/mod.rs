//! Per-pallet `Config` implementations for [`crate::Runtime`], one file
//! per pallet — the same layout the teacher uses under
//! `runtime/src/configs/*_config.rs`.

mod amm_config;
mod avl_engine_config;
mod parameter_controller_config;
