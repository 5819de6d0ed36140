//! Message catalog backed by a TOML file.
//!
//! Each key maps to a string or a list of strings. The first string is the
//! primary value used for messages and new signs; the rest are aliases that
//! are still recognized when reading signs. Values use `&` color codes.
//!
//! Keys may be written flat (`"protection.expired" = "..."`) or as tables
//! (`[protection]` then `expired = "..."`).

use std::path::Path;
use std::rc::Rc;

use blocklocker_core::{Player, Translation};
use blocklocker_host::Translator;
use toml::{Table, Value};

use crate::error::{ConfigError, Result};

/// Prefix of color codes as written in files.
const ALT_COLOR_CHAR: char = '&';
/// Prefix of color codes as sent to clients.
const COLOR_CHAR: char = '\u{a7}';
const COLOR_CODES: &str = "0123456789abcdefklmnorx";

/// Delivers rendered chat lines to players.
pub trait ChatSink {
    fn send_chat(&self, player: &Player, message: &str);
}

/// One translated string in its three forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationValue {
    original: String,
    colored: String,
    uncolored: String,
}

impl TranslationValue {
    pub fn new(original: &str) -> Self {
        let original = original.trim().to_string();
        let colored = translate_color_codes(&original);
        let uncolored = strip_color(&colored);
        Self {
            original,
            colored,
            uncolored,
        }
    }

    /// As written in the file, with `&` codes.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// With `&` codes turned into client color codes.
    pub fn colored(&self) -> &str {
        &self.colored
    }

    /// With all color codes removed.
    pub fn uncolored(&self) -> &str {
        &self.uncolored
    }
}

#[derive(Debug, Clone)]
struct Entry {
    primary: TranslationValue,
    aliases: Vec<TranslationValue>,
}

impl Entry {
    fn from_strings(values: &[String]) -> Option<Self> {
        let (first, rest) = values.split_first()?;
        Some(Self {
            primary: TranslationValue::new(first),
            aliases: rest.iter().map(|v| TranslationValue::new(v)).collect(),
        })
    }

    fn all(&self) -> impl Iterator<Item = &TranslationValue> {
        std::iter::once(&self.primary).chain(self.aliases.iter())
    }

    fn to_value(&self) -> Value {
        if self.aliases.is_empty() {
            Value::String(self.primary.original.clone())
        } else {
            Value::Array(
                self.all()
                    .map(|v| Value::String(v.original.clone()))
                    .collect(),
            )
        }
    }
}

/// Translations read from a file, falling back to built-in defaults.
pub struct ConfigTranslator {
    /// One entry per key, in `Translation::ALL` order.
    entries: Vec<Entry>,
    needs_save: bool,
    sink: Option<Rc<dyn ChatSink>>,
}

impl ConfigTranslator {
    /// The built-in catalog.
    pub fn defaults() -> Self {
        let entries = Translation::ALL
            .iter()
            .map(|&translation| default_entry(translation))
            .collect();
        Self {
            entries,
            needs_save: false,
            sink: None,
        }
    }

    /// Parse user translations. Keys the user did not specify use the
    /// built-in value and mark the catalog as needing a save.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: Table = toml::from_str(source)?;
        let mut values = Vec::new();
        flatten("", &table, &mut values);

        let mut user = Vec::with_capacity(values.len());
        for (key, value) in values {
            match key.parse::<Translation>() {
                Ok(translation) => user.push((translation, strings_of(&key, value)?)),
                Err(_) => tracing::warn!(key = %key, "ignoring unknown translation key"),
            }
        }

        let mut needs_save = false;
        let entries = Translation::ALL
            .iter()
            .map(|&translation| {
                user.iter()
                    .rev()
                    .find(|(t, _)| *t == translation)
                    .and_then(|(_, strings)| Entry::from_strings(strings))
                    .unwrap_or_else(|| {
                        needs_save = true;
                        default_entry(translation)
                    })
            })
            .collect();

        Ok(Self {
            entries,
            needs_save,
            sink: None,
        })
    }

    /// Read user translations from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let translator = Self::from_toml_str(&source)?;
        if translator.needs_save {
            tracing::debug!(path = %path.as_ref().display(), "translation file is missing keys");
        }
        Ok(translator)
    }

    /// Deliver messages through `sink`.
    pub fn with_sink(mut self, sink: Rc<dyn ChatSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    fn entry(&self, translation: Translation) -> &Entry {
        &self.entries[translation as usize]
    }

    /// The colored primary value.
    pub fn get(&self, translation: Translation) -> &str {
        self.entry(translation).primary.colored()
    }

    /// The primary value without colors.
    pub fn get_without_color(&self, translation: Translation) -> &str {
        self.entry(translation).primary.uncolored()
    }

    /// The primary value and every alias, without colors.
    pub fn all_without_color(&self, translation: Translation) -> Vec<&str> {
        self.entry(translation)
            .all()
            .map(TranslationValue::uncolored)
            .collect()
    }

    /// Whether `text` reads as any form of `translation`, ignoring colors,
    /// case and surrounding whitespace.
    pub fn matches(&self, translation: Translation, text: &str) -> bool {
        let text = strip_color(text);
        let text = text.trim();
        self.entry(translation)
            .all()
            .any(|value| value.uncolored().eq_ignore_ascii_case(text))
    }

    /// The colored primary value with `{0}`, `{1}`, ... replaced by `args`.
    ///
    /// Substitution is a single pass over the template: text coming from an
    /// argument is never scanned for placeholders. Placeholders without a
    /// matching argument are left as written.
    pub fn format(&self, translation: Translation, args: &[String]) -> String {
        let template = self.get(translation);
        let mut message = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            message.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let arg = after.find('}').and_then(|close| {
                let index: usize = after[..close].parse().ok()?;
                args.get(index).map(|arg| (arg, close))
            });
            match arg {
                Some((arg, close)) => {
                    message.push_str(arg);
                    rest = &after[close + 1..];
                }
                None => {
                    message.push('{');
                    rest = after;
                }
            }
        }
        message.push_str(rest);
        message
    }

    /// Whether the file this catalog was read from lacks keys.
    pub fn needs_save(&self) -> bool {
        self.needs_save
    }

    /// Render the full catalog as TOML, grouped by key prefix.
    pub fn to_toml_string(&self) -> Result<String> {
        let mut root = Table::new();
        for (translation, entry) in Translation::ALL.iter().zip(&self.entries) {
            let key = translation.key();
            match key.split_once('.') {
                Some((section, name)) => {
                    let section = root
                        .entry(section)
                        .or_insert_with(|| Value::Table(Table::new()));
                    if let Value::Table(section) = section {
                        section.insert(name.to_string(), entry.to_value());
                    }
                }
                None => {
                    root.insert(key.to_string(), entry.to_value());
                }
            }
        }
        Ok(toml::to_string(&root)?)
    }

    /// Write the full catalog to `path`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_toml_string()?)?;
        self.needs_save = false;
        Ok(())
    }
}

impl Default for ConfigTranslator {
    fn default() -> Self {
        Self::defaults()
    }
}

impl std::fmt::Debug for ConfigTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigTranslator")
            .field("entries", &self.entries.len())
            .field("needs_save", &self.needs_save)
            .finish_non_exhaustive()
    }
}

impl Translator for ConfigTranslator {
    fn send_message(&self, player: &Player, translation: Translation, args: &[String]) {
        match &self.sink {
            Some(sink) => sink.send_chat(player, &self.format(translation, args)),
            None => tracing::debug!(
                player = %player.name,
                %translation,
                "no chat sink, dropping message"
            ),
        }
    }
}

fn default_entry(translation: Translation) -> Entry {
    let values: &[&str] = match translation {
        Translation::ProtectionBypassed => &["&6[BlockLocker] &eBypassed a protection of {0}."],
        Translation::ProtectionClaimedContainer => &["&6[BlockLocker] &eClaimed the container."],
        Translation::ProtectionExpired => {
            &["&6[BlockLocker] &eThis protection has expired, so anyone can use it."]
        }
        Translation::ProtectionIsClaimedBy => &["&6[BlockLocker] &4This block is claimed by {0}."],
        Translation::ProtectionNoAccess => {
            &["&6[BlockLocker] &4You don't have access to this block. Owner: {0}."]
        }
        Translation::ProtectionSelectedSign => {
            &["&6[BlockLocker] &eSelected the sign for editing."]
        }
        Translation::TagEveryone => &["[Everyone]"],
        Translation::TagMoreUsers => &["[More Users]"],
        Translation::TagPrivate => &["[Private]", "[Lock]"],
        Translation::TagRedstone => &["[Redstone]"],
    };
    let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    Entry {
        primary: TranslationValue::new(&values[0]),
        aliases: values[1..].iter().map(|v| TranslationValue::new(v)).collect(),
    }
}

fn flatten(prefix: &str, table: &Table, out: &mut Vec<(String, Value)>) {
    for (key, value) in table {
        let key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Table(inner) => flatten(&key, inner, out),
            other => out.push((key, other.clone())),
        }
    }
}

fn strings_of(key: &str, value: Value) -> Result<Vec<String>> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    };
    match value {
        Value::String(s) => Ok(vec![s]),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(invalid("list entries must be strings")),
            })
            .collect(),
        _ => Err(invalid("expected a string or a list of strings")),
    }
}

/// Turn `&`-prefixed codes into client color codes.
pub fn translate_color_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == ALT_COLOR_CHAR && is_color_code(next) => {
                out.push(COLOR_CHAR);
                out.push(next.to_ascii_lowercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Remove client color codes.
pub fn strip_color(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == COLOR_CHAR && is_color_code(next) => {
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

fn is_color_code(c: char) -> bool {
    COLOR_CODES.contains(c.to_ascii_lowercase())
}
