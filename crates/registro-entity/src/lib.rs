//! # registro-entity
//!
//! Domain entity models for Registro. Entities are plain records with
//! domain predicates; each implements
//! [`Record`](registro_core::traits::Record) so repositories can build it
//! from a raw store row.

pub mod persona;
pub mod row;
