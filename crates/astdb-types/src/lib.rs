//! Strongly typed IDs, spans, CIDs, and kind enumerations shared by every
//! other crate in the ASTDB workspace (spec.md §3.1, §9).
//!
//! This crate sits at the bottom of the dependency graph alongside
//! `astdb-error`; it carries no logic, only the nominal types that keep a
//! `NodeId` from ever being mistaken for a `DeclId` or a raw `u32`.

mod cid;
mod cid_opts;
mod ids;
mod kinds;
mod severity;
mod span;

pub use cid::{Cid, CidSubject, CID_LEN};
pub use cid_opts::{CidOpts, EffectMask, ProfileMask};
pub use ids::{DeclId, DiagId, EdgeId, NodeId, RefId, ScopeId, StrId, TokenId, TypeId, UnitId};
pub use kinds::{DeclKind, NodeKind, TokenKind};
pub use severity::Severity;
pub use span::Span;
