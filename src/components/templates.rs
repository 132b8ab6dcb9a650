use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::errors::WikiError;
use crate::utils::escape_html;

/// The templates every deployment must provide, as `<name>.html`
pub const TEMPLATE_NAMES: [&str; 3] = ["edit", "view", "list"];

/// A value bound to a template field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    List(Vec<TemplateData>),
}

/// Named fields handed to a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateData {
    fields: BTreeMap<String, Value>,
}

impl TemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), Value::Text(value.into()));
        self
    }

    pub fn with_list(mut self, key: &str, items: Vec<TemplateData>) -> Self {
        self.fields.insert(key.to_string(), Value::List(items));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Templates loaded once at startup and only read afterwards.
///
/// Placeholders follow the `{{NAME}}` substitution used for the page shell:
/// `{{Field}}` inserts an escaped text field and `{{#Field}}...{{/Field}}`
/// repeats its body for each item of a list field.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: HashMap<String, String>,
}

impl TemplateSet {
    /// Read `edit.html`, `view.html` and `list.html` from `dir`
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let mut templates = HashMap::new();
        for name in TEMPLATE_NAMES {
            let path = dir.join(format!("{}.html", name));
            let source = fs::read_to_string(&path).map_err(|e| {
                log::error!("Failed to load template {:?}: {}", path, e);
                WikiError::Io(e)
            })?;
            templates.insert(name.to_string(), source);
        }
        log::info!("Loaded {} templates from {:?}", templates.len(), dir);
        Ok(Self { templates })
    }

    pub fn from_sources<'a>(sources: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let templates = sources
            .into_iter()
            .map(|(name, source)| (name.to_string(), source.to_string()))
            .collect();
        Self { templates }
    }

    pub fn render(&self, name: &str, data: &TemplateData) -> Result<String, WikiError> {
        let source = self
            .templates
            .get(name)
            .ok_or_else(|| WikiError::Render(format!("no template named {:?}", name)))?;
        let mut out = String::with_capacity(source.len());
        render_into(&mut out, source, &[data])
            .map_err(|e| WikiError::Render(format!("{}: {}", name, e)))?;
        Ok(out)
    }
}

fn lookup<'a>(scopes: &[&'a TemplateData], key: &str) -> Option<&'a Value> {
    scopes.iter().rev().find_map(|scope| scope.get(key))
}

/// Split the next `{{tag}}` off `src`: (text before, trimmed tag, rest after)
fn next_tag(src: &str) -> Result<Option<(&str, &str, &str)>, String> {
    let Some(open) = src.find("{{") else {
        return Ok(None);
    };
    let after_open = &src[open + 2..];
    let close = after_open
        .find("}}")
        .ok_or_else(|| "unterminated tag".to_string())?;
    Ok(Some((&src[..open], after_open[..close].trim(), &after_open[close + 2..])))
}

/// Find the body of section `name`, returning (body, rest after the close tag)
fn split_section<'s>(src: &'s str, name: &str) -> Result<(&'s str, &'s str), String> {
    let mut depth = 0usize;
    let mut rest = src;
    while let Some((text, tag, after)) = next_tag(rest)? {
        let tag_start = src.len() - rest.len() + text.len();
        if tag.starts_with('#') {
            depth += 1;
        } else if let Some(closing) = tag.strip_prefix('/') {
            if depth == 0 {
                let closing = closing.trim();
                if closing != name {
                    return Err(format!("section `{}` closed by `{}`", name, closing));
                }
                return Ok((&src[..tag_start], after));
            }
            depth -= 1;
        }
        rest = after;
    }
    Err(format!("unclosed section `{}`", name))
}

fn render_into(out: &mut String, src: &str, scopes: &[&TemplateData]) -> Result<(), String> {
    let mut rest = src;
    while let Some((text, tag, after)) = next_tag(rest)? {
        out.push_str(text);
        if let Some(name) = tag.strip_prefix('#') {
            let name = name.trim();
            let (body, remainder) = split_section(after, name)?;
            match lookup(scopes, name) {
                Some(Value::List(items)) => {
                    for item in items {
                        let mut inner = scopes.to_vec();
                        inner.push(item);
                        render_into(out, body, &inner)?;
                    }
                }
                Some(Value::Text(_)) => return Err(format!("`{}` is not a list", name)),
                None => return Err(format!("unknown field `{}`", name)),
            }
            rest = remainder;
            continue;
        }
        if let Some(name) = tag.strip_prefix('/') {
            return Err(format!("unexpected close of `{}`", name.trim()));
        }
        match lookup(scopes, tag) {
            Some(Value::Text(value)) => out.push_str(&escape_html(value)),
            Some(Value::List(_)) => return Err(format!("`{}` is a list, not text", tag)),
            None => return Err(format!("unknown field `{}`", tag)),
        }
        rest = after;
    }
    out.push_str(rest);
    Ok(())
}
