//! **tilegrid** — a deterministic grid placement and reflow engine.
//!
//! Windows are packed into a fixed `rows × cols` grid in row-major order:
//! each new window takes the next free cell, left to right, top to bottom.
//! After every insertion a reflow pass recomputes each window's span so the
//! grid always looks fully packed — the most recently filled slot stretches
//! to the right edge, and every window in its row band stretches to the
//! bottom edge.
//!
//! # Architecture
//!
//! The crate is a single core type plus its vocabulary:
//!
//! * [`engine::GridLayoutEngine`] — owns the window sequence and the
//!   allocation cursor; exposes `insert`, `reflow`, and read-only snapshots.
//! * [`grid`] — the geometry types ([`grid::GridDims`], [`grid::Window`],
//!   [`grid::WindowHandle`]) shared between the engine and its hosts.
//! * [`config`] — optional JSON configuration for hosts that want the grid
//!   capacity and overflow behavior to be user-tunable.
//!
//! The engine knows nothing about any real window system: a compositor's
//! layout manager feeds it insertions and renders its snapshots.

pub mod config;
pub mod engine;
pub mod grid;
