//! # gosplit-core
//!
//! Core types shared across all gosplit crates:
//! - Arena handles (`DeclId`, `CommentId`, `ImportId`) for one parse pass
//! - The parsed source model (declarations, comment blocks, import specs)
//! - Split modes and the per-file state machine
//! - Report types returned by the orchestrator and printed by the CLI
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
