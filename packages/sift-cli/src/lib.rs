use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Help output palette shared by every sift binary.
pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Yellow.on_default() | Effects::BOLD)
		.usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
		.literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
		.error(AnsiColor::Red.on_default() | Effects::BOLD)
}
