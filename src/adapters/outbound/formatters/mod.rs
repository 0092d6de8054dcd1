/// Formatter adapters for the different report output formats
mod html_formatter;
mod json_formatter;
mod markdown_formatter;

#[cfg(test)]
mod fixtures;

pub use html_formatter::HtmlFormatter;
pub use json_formatter::JsonFormatter;
pub use markdown_formatter::MarkdownFormatter;
