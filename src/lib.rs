//! # Study Index
//!
//! Builds static JSON indexes of previous-year question papers (PYQs) and
//! lecture notes for the study-materials browsing app.
//!
//! The content root has been organised under several conventions over the
//! years. Every file is classified against the supported layouts, enriched
//! (exam year, expanded subject name, human-readable size), merged with
//! externally hosted notes from a manifest, and written as two
//! deterministically ordered JSON arrays.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────┐   ┌─────────────┐
//! │ Content root │──▶│ Classifier │──▶│ EntryBuilder│──┐
//! │  (walkdir)   │   │  layouts   │   │ year/subject│  │   ┌───────────┐   ┌──────────────┐
//! └──────────────┘   └────────────┘   │    /size    │  ├──▶│ Assembler │──▶│ pyq-index    │
//!                                     └─────────────┘  │   │  (sort)   │   │ notes-index  │
//! ┌──────────────┐   ┌────────────┐                    │   └───────────┘   └──────────────┘
//! │   Manifest   │──▶│   Merger   │────────────────────┘
//! └──────────────┘   └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! study-index init                       # write study-index.toml
//! study-index sources                    # check content root and manifest
//! study-index build                      # write pyq-index.json + notes-index.json
//! study-index classify pyq/cse/sem4/afl/mid/AFL_MIDSEM_2023.pdf
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`error`] | Rejection reasons and fatal errors |
//! | [`year`] | Year extraction from filenames |
//! | [`subject`] | Subject abbreviation expansion |
//! | [`size`] | Human-readable file sizes |
//! | [`classify`] | Layout matching for relative paths |
//! | [`entry`] | Canonical entry construction |
//! | [`manifest`] | External manifest merging |
//! | [`assemble`] | Deterministic index ordering |
//! | [`connector_fs`] | Filesystem content source |
//! | [`export`] | Atomic JSON index writer |
//! | [`ingest`] | Build pipeline |
//! | [`sources`] | Input status report |

pub mod assemble;
pub mod classify;
pub mod config;
pub mod connector_fs;
pub mod entry;
pub mod error;
pub mod export;
pub mod ingest;
pub mod manifest;
pub mod models;
pub mod size;
pub mod sources;
pub mod subject;
pub mod year;
