//! Class-based syntax highlighting for fenced code blocks.
//!
//! Code is tokenised with syntect and emitted as `<span class="hl-…">` markup.
//! The colours live in a single stylesheet generated from the theme, which the
//! site embeds once per page instead of repeating inline styles.

use std::fmt::Write;

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::RenderError;
use crate::util::escape_html;

/// Prefix applied to every generated CSS class.
pub const CLASS_PREFIX: &str = "hl-";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed {
    prefix: CLASS_PREFIX,
};

/// Syntax highlighter holding the loaded syntax definitions and one theme.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    /// Load syntect's bundled syntaxes and the named bundled theme.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownTheme`] if the theme is not bundled.
    pub fn new(theme_name: &str) -> Result<Self, RenderError> {
        let mut themes = ThemeSet::load_defaults();
        let Some(theme) = themes.themes.remove(theme_name) else {
            let available = themes
                .themes
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(RenderError::UnknownTheme {
                name: theme_name.to_owned(),
                available,
            });
        };
        tracing::debug!(theme = theme_name, "Loaded highlight theme");

        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Generate the stylesheet matching the classes emitted by [`code_block`](Self::code_block).
    pub fn stylesheet(&self) -> Result<String, RenderError> {
        Ok(css_for_theme_with_class_style(&self.theme, CLASS_STYLE)?)
    }

    /// Render a fenced code block.
    ///
    /// Languages syntect does not know (and blocks without a language) are
    /// emitted as escaped plain text; no language is guessed.
    pub fn code_block(&self, lang: Option<&str>, source: &str) -> Result<String, RenderError> {
        let syntax = lang.and_then(|token| self.syntaxes.find_syntax_by_token(token));

        let code = match syntax {
            Some(syntax) => {
                let mut generator =
                    ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, CLASS_STYLE);
                for line in LinesWithEndings::from(source) {
                    generator.parse_html_for_line_which_includes_newline(line)?;
                }
                generator.finalize()
            }
            None => escape_html(source),
        };

        let mut html = String::with_capacity(code.len() + 96);
        html.push_str("<div class=\"codehilite\"><pre class=\"");
        html.push_str(CLASS_PREFIX);
        html.push_str("code\"><code");
        if let Some(lang) = lang {
            let _ = write!(html, " class=\"language-{}\"", escape_html(lang));
        }
        html.push('>');
        html.push_str(&code);
        html.push_str("</code></pre></div>\n");
        Ok(html)
    }
}
