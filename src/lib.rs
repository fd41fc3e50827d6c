#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod activity;
pub mod clock;
pub mod connection;
pub mod dialog;
pub mod error;
pub mod extractor;
pub mod field;
pub mod forecast;
pub mod i18n;
pub mod mapper;
pub mod plugin;
pub mod prelude;
pub mod quantity;
pub mod request;
pub mod setting;
pub mod solarprognose;
pub mod table;
pub mod template;
pub mod value;
