//! Scoped component stylesheets and host-supplied theme tokens.
//!
//! Component rules are written against the component's own markup using `:host`,
//! `:host(...)`, and `::slotted(...)` the way shadow-scoped CSS is written. [`StyleSheet::scoped`]
//! rewrites every selector so it only matches nodes stamped with the component's scope
//! attribute (or the host element itself), which keeps rules from leaking in either
//! direction. The only values that cross the boundary are token variables
//! (`var(--name, fallback)`), which degrade to the built-in fallback when the page does not
//! define them.

use std::collections::BTreeMap;
use std::fmt;

use element_contract::{Theme, TokenEnum};
use leptos::logging;
use serde::Deserialize;

use crate::config::ConfigError;
use crate::tree::{SCOPE_ATTRIBUTE, SLOTTED_ATTRIBUTE};

/// Reference to a page-level token variable with a built-in fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRef {
    /// Variable name without the leading `--`.
    pub name: &'static str,
    /// Value used when the page does not supply the token.
    pub fallback: &'static str,
}

impl TokenRef {
    /// Creates a token reference.
    pub const fn new(name: &'static str, fallback: &'static str) -> Self {
        Self { name, fallback }
    }
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var(--{}, {})", self.name, self.fallback)
    }
}

/// One CSS rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Selector list.
    pub selector: String,
    /// Property/value pairs.
    pub declarations: Vec<(String, String)>,
}

impl StyleRule {
    /// Starts a rule.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    /// Appends a declaration.
    pub fn decl(mut self, property: &str, value: impl fmt::Display) -> Self {
        self.declarations
            .push((property.to_string(), value.to_string()));
        self
    }
}

/// Ordered rules of one component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleSheet {
    /// Rules in source order.
    pub rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// Empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn rule(mut self, rule: StyleRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rewrites every selector into the scope of `tag`.
    pub fn scoped(&self, tag: &str) -> Self {
        Self {
            rules: self
                .rules
                .iter()
                .map(|rule| StyleRule {
                    selector: scope_selector(tag, &rule.selector),
                    declarations: rule.declarations.clone(),
                })
                .collect(),
        }
    }

    /// Serialises the sheet.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for rule in &self.rules {
            css.push_str(&rule.selector);
            css.push_str(" {");
            for (property, value) in &rule.declarations {
                css.push(' ');
                css.push_str(property);
                css.push_str(": ");
                css.push_str(value);
                css.push(';');
            }
            css.push_str(" }\n");
        }
        css
    }
}

/// Rewrites a selector list so each compound only matches inside `tag`'s subtree.
///
/// `:host` becomes the tag, `:host(X)` becomes `tagX`, `::slotted(X)` becomes `X` inside the
/// tag carrying the slotted marker, and every other compound gets the scope attribute.
pub fn scope_selector(tag: &str, selector: &str) -> String {
    split_top_level(selector, ',')
        .into_iter()
        .map(|complex| scope_complex(tag, complex.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whether every selector in the list is confined to `tag`'s subtree.
///
/// A compound is confined when it names the host tag, carries the scope attribute, or
/// carries the host's slotted marker (light content assigned to one of its slots).
pub fn is_scoped(tag: &str, selector: &str) -> bool {
    let marker = scope_marker(tag);
    let slotted = slotted_marker(tag);
    split_top_level(selector, ',').into_iter().all(|complex| {
        tokenize(complex.trim()).into_iter().all(|token| match token {
            Token::Combinator(_) => true,
            Token::Compound(compound) => {
                let is_host = compound.starts_with(tag)
                    && !compound[tag.len()..].starts_with(|c: char| c.is_alphanumeric() || c == '-');
                is_host || compound.contains(&marker) || compound.contains(&slotted)
            }
        })
    })
}

fn scope_marker(tag: &str) -> String {
    format!("[{SCOPE_ATTRIBUTE}=\"{tag}\"]")
}

fn slotted_marker(tag: &str) -> String {
    format!("[{SLOTTED_ATTRIBUTE}~=\"{tag}\"]")
}

fn scope_complex(tag: &str, complex: &str) -> String {
    let marker = scope_marker(tag);
    let mut out = String::new();
    for token in tokenize(complex) {
        match token {
            Token::Combinator(' ') => out.push(' '),
            Token::Combinator(c) => {
                out.push(' ');
                out.push(c);
                out.push(' ');
            }
            Token::Compound(compound) => out.push_str(&scope_compound(tag, &marker, compound)),
        }
    }
    out
}

fn scope_compound(tag: &str, marker: &str, compound: &str) -> String {
    if let Some(rest) = compound.strip_prefix(":host(") {
        if let Some(close) = matching_paren(rest) {
            return format!("{tag}{}{}", &rest[..close], &rest[close + 1..]);
        }
    }
    if let Some(rest) = compound.strip_prefix(":host") {
        return format!("{tag}{rest}");
    }
    if let Some(rest) = compound.strip_prefix("::slotted(") {
        if let Some(close) = matching_paren(rest) {
            let inner = with_marker(&rest[..close], &slotted_marker(tag));
            return format!("{tag} {inner}{}", &rest[close + 1..]);
        }
    }
    with_marker(compound, marker)
}

fn with_marker(compound: &str, marker: &str) -> String {
    match compound.find("::") {
        Some(pseudo) => format!("{}{marker}{}", &compound[..pseudo], &compound[pseudo..]),
        None => format!("{compound}{marker}"),
    }
}

fn matching_paren(rest: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (index, ch) in rest.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

enum Token<'a> {
    Compound(&'a str),
    Combinator(char),
}

fn tokenize(complex: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    let mut pending: Option<char> = None;

    for (index, ch) in complex.char_indices() {
        let is_combinator = depth == 0 && matches!(ch, ' ' | '>' | '+' | '~');
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if is_combinator {
            if let Some(begin) = start.take() {
                tokens.push(Token::Compound(&complex[begin..index]));
                pending = Some(' ');
            }
            if ch != ' ' {
                pending = Some(ch);
            }
        } else if start.is_none() {
            if let Some(c) = pending.take() {
                tokens.push(Token::Combinator(c));
            }
            start = Some(index);
        }
    }
    if let Some(begin) = start {
        tokens.push(Token::Compound(&complex[begin..]));
    }
    tokens
}

fn split_top_level(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut begin = 0;
    for (index, ch) in input.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&input[begin..index]);
                begin = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[begin..]);
    parts.into_iter().filter(|p| !p.trim().is_empty()).collect()
}

/// Page-level token values per theme.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeTokens {
    values: BTreeMap<Theme, BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeTokensFile {
    light: BTreeMap<String, String>,
    dark: BTreeMap<String, String>,
}

impl ThemeTokens {
    /// Empty token set; every reference resolves to its fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `[light]` and `[dark]` tables of token overrides. Malformed values are dropped.
    pub fn from_toml_str(body: &str) -> Result<Self, ConfigError> {
        let file: ThemeTokensFile = toml::from_str(body)?;
        let mut tokens = Self::new();
        for (name, value) in file.light {
            tokens.set(Theme::Light, &name, &value);
        }
        for (name, value) in file.dark {
            tokens.set(Theme::Dark, &name, &value);
        }
        Ok(tokens)
    }

    /// Stores a token value. Returns `false` and logs when the value is malformed.
    pub fn set(&mut self, theme: Theme, name: &str, value: &str) -> bool {
        let name = name.trim_start_matches("--");
        if !is_valid_token_value(value) || name.is_empty() {
            logging::warn!(
                "ignoring malformed theme token `--{name}` for {} theme",
                theme.token()
            );
            return false;
        }
        self.values
            .entry(theme)
            .or_default()
            .insert(name.to_string(), value.trim().to_string());
        true
    }

    /// Concrete value for `token` under `theme`, or its fallback.
    pub fn resolve(&self, theme: Theme, token: &TokenRef) -> String {
        self.values
            .get(&theme)
            .and_then(|values| values.get(token.name))
            .cloned()
            .unwrap_or_else(|| token.fallback.to_string())
    }

    /// Page-level CSS defining every stored token under its theme selector.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (theme, values) in &self.values {
            if values.is_empty() {
                continue;
            }
            css.push_str(&format!("[data-theme=\"{}\"] {{", theme.token()));
            for (name, value) in values {
                css.push_str(&format!(" --{name}: {value};"));
            }
            css.push_str(" }\n");
        }
        css
    }
}

fn is_valid_token_value(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && !trimmed.contains([';', '{', '}', '<', '>'])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn host_selectors_map_to_the_tag() {
        assert_eq!(scope_selector("sh-badge", ":host"), "sh-badge");
        assert_eq!(scope_selector("sh-badge", ":host([pill])"), "sh-badge[pill]");
        assert_eq!(
            scope_selector("sh-card", ":host([data-theme=\"light\"]) .card"),
            "sh-card[data-theme=\"light\"] .card[data-scope=\"sh-card\"]"
        );
        assert_eq!(
            scope_selector("sh-card", "::slotted(*)"),
            "sh-card *[data-slotted~=\"sh-card\"]"
        );
    }

    #[test]
    fn plain_compounds_get_the_scope_attribute() {
        assert_eq!(
            scope_selector("sh-badge", ".badge.success, .badge:hover"),
            ".badge.success[data-scope=\"sh-badge\"], .badge:hover[data-scope=\"sh-badge\"]"
        );
        assert_eq!(
            scope_selector("sh-input", ".wrapper>input::placeholder"),
            ".wrapper[data-scope=\"sh-input\"] > input[data-scope=\"sh-input\"]::placeholder"
        );
    }

    #[test]
    fn scoped_sheets_never_match_outside_the_component() {
        let sheet = StyleSheet::new()
            .rule(StyleRule::new(":host").decl("display", "inline-block"))
            .rule(StyleRule::new(".badge .dot, ::slotted(svg)").decl("margin", "0"))
            .rule(StyleRule::new("button ~ span").decl("opacity", "0.5"));
        let scoped = sheet.scoped("sh-badge");

        for rule in &scoped.rules {
            assert!(is_scoped("sh-badge", &rule.selector), "{}", rule.selector);
        }
        assert!(!is_scoped("sh-badge", ".badge"));
        assert!(!is_scoped("sh-badge", "sh-badge-extra .x[data-scope=\"sh-badge\"]"));
        assert!(!is_scoped("sh-badge", "body > .badge[data-scope=\"sh-badge\"]"));
        assert!(!is_scoped("sh-badge", "sh-badge > svg"));
    }

    #[test]
    fn css_serialisation_inlines_token_fallbacks() {
        let css = StyleSheet::new()
            .rule(
                StyleRule::new(".badge.success")
                    .decl("color", TokenRef::new("sh-color-success", "#10b981")),
            )
            .scoped("sh-badge")
            .to_css();
        assert_eq!(
            css,
            ".badge.success[data-scope=\"sh-badge\"] { color: var(--sh-color-success, #10b981); }\n"
        );
    }

    #[test]
    fn malformed_theme_tokens_fall_back() {
        let mut tokens = ThemeTokens::from_toml_str(
            "[light]\nsh-color-success = \"#059669\"\n[dark]\nsh-color-success = \"red; }\"\n",
        )
        .expect("parse tokens");
        let success = TokenRef::new("sh-color-success", "#10b981");

        assert_eq!(tokens.resolve(Theme::Light, &success), "#059669");
        assert_eq!(tokens.resolve(Theme::Dark, &success), "#10b981");
        assert!(!tokens.set(Theme::Dark, "sh-color-danger", "  "));
        assert!(!tokens.set(Theme::Dark, "sh-color-danger", "<script>"));
        assert!(tokens.set(Theme::Dark, "--sh-color-danger", "#f87171"));
        assert_eq!(
            tokens.to_css(),
            "[data-theme=\"light\"] { --sh-color-success: #059669; }\n\
             [data-theme=\"dark\"] { --sh-color-danger: #f87171; }\n"
        );
    }
}
