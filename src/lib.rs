//! TakePrompter - teleprompter-driven recording assistant for OBS Studio
//!
//! Walks an operator through a markdown script block by block, drives a
//! recording per block on a remote capture backend, offers retake/skip and
//! navigation controls, then tags each accepted take with metadata derived
//! from the script.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Script blocks, cursor navigation, the take state machine, metadata
//! - **Application**: Use cases (recording controller, take loop, session) and port traits
//! - **Infrastructure**: Adapter implementations (obs-websocket, FFmpeg, markdown, config)
//! - **CLI**: Argument parsing, terminal chooser/renderer and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
