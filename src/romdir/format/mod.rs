//! Table parsing layer for ROMDIR images.
//!
//! This module bridges between the raw image bytes and the high-level
//! [`Directory`](crate::romdir::reader::Directory).
//!
//! # Module Organization
//!
//! - [`record`]: Finds the table and decodes its 16-byte records
//! - [`layout`]: Derives payload and extinfo offsets from record sizes
//! - [`extinfo`]: Locates the EXTINFO payload and resolves extinfo blocks
//!
//! # Architecture
//!
//! ```text
//! Image:
//! ┌─────────────────┐ 0x0
//! │  RESET payload  │ ← table lives inside, found by scanning
//! │  ┌───────────┐  │
//! │  │ RESET     │  │ ← record::locate_table()
//! │  │ ROMDIR    │  │
//! │  │ EXTINFO   │  │
//! │  │ ...       │  │
//! │  │ \0        │  │ ← terminator
//! │  └───────────┘  │
//! ├─────────────────┤ align16(RESET size)
//! │  next payload   │ ← layout::OffsetAssigner
//! ├─────────────────┤
//! │  ...            │
//! └─────────────────┘
//! ```

pub mod extinfo;
pub mod layout;
pub mod record;
