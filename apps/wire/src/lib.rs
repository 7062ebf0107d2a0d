//! Command-line host for Dubbox component wiring.
//!
//! `dbx-wire run` plays the part of an application container: it loads the
//! layered `spring.dubbo` configuration, wires components into an in-memory
//! registry and prints what happened. `dbx-wire schema` lists accepted keys.

pub mod args;
pub mod commands;
pub mod logging;
