// crates/canopen-rs/src/od/constants.rs
//! Central repository for standard Object Dictionary indices and sub-indices.
//!
//! This module provides `pub const` definitions for well-known object
//! indices from the communication profile area (CiA 301), using a
//! consistent `IDX_` and `SUBIDX_` naming convention.

// --- 0x1000 - 0x1FFF: Communication Profile Area ---

pub const IDX_DEVICE_TYPE_U32: u16 = 0x1000;
pub const IDX_ERROR_REGISTER_U8: u16 = 0x1001;

pub const IDX_IDENTITY_OBJECT_REC: u16 = 0x1018;
pub const SUBIDX_IDENTITY_VENDOR_ID: u8 = 1;
pub const SUBIDX_IDENTITY_PRODUCT_CODE: u8 = 2;
pub const SUBIDX_IDENTITY_REVISION_NUMBER: u8 = 3;
pub const SUBIDX_IDENTITY_SERIAL_NUMBER: u8 = 4;
