//! This module contains all configuration-relevant code: the settings file of
//! the tool itself and the option taxonomy that shapes line output, together
//! with everything needed to gather, merge and validate those options.
//!
//! Your starting point should probably be [`resolve_configuration`].
//!
//! # Internals
//! Like the settings file, the options are based on the concept of
//! unvalidated ("unresolved") and validated structures.
//!
//! Raw sources (command-line options, JSON option files and trailing
//! `-flag value` tokens) are merged as untyped JSON first:
//! option files are [unified][unify::unify] additively, then
//! [deep-merged][merge::deep_merge] with the trailing tokens and the
//! command-line options on top. The merged object is instantiated
//! into [`UnresolvedOptions`][options::UnresolvedOptions] through the
//! [`OptionGroup`][options::OptionGroup] registry and then
//! [resolved][resolve::resolve] into a [`ResolvedConfig`][resolve::ResolvedConfig].
//! Derivations that span several groups (e.g. flat mode) happen there.

#![allow(rustdoc::private_intra_doc_links)]

mod errors;
mod locator;
mod merge;
mod options;
mod pipeline;
mod resolve;
mod settings;
mod tokenizer;
mod traits;
mod unify;
mod utilities;

pub use options::FilterType;
pub use pipeline::{resolve_configuration, ConfigurationRequest};
pub use resolve::ResolutionContext;
pub use settings::Settings;
pub use tokenizer::split_positional;
