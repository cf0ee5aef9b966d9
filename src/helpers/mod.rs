//! Helper functions shared by templates, commands, and the generator

pub mod date;
pub mod html;
pub mod url;
