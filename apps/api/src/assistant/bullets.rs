//! Bullet assistant services. Responses are plain text, one bullet per line,
//! cleaned by `clean_bullet_lines`.

use tracing::debug;

use crate::assistant::prompts::{
    ENHANCE_PROMPT_TEMPLATE, ENHANCE_SYSTEM, GENERATE_PROMPT_TEMPLATE, GENERATE_SYSTEM,
    MORE_PROMPT_TEMPLATE, MORE_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::{ChatModel, ChatRequest};

pub const DEFAULT_BULLET_COUNT: usize = 3;
pub const MAX_BULLET_COUNT: usize = 10;
pub const MORE_BULLET_COUNT: usize = 2;

const GENERATE_TEMPERATURE: f32 = 0.7;
const ENHANCE_TEMPERATURE: f32 = 0.6;
const MORE_TEMPERATURE: f32 = 0.7;

const MARKERS: [char; 6] = ['-', '–', '—', '•', '*', '·'];

/// Returns at most `count` bullets; a model that returns fewer is not padded.
pub async fn generate_bullets(
    summary: &str,
    count: usize,
    model: &dyn ChatModel,
) -> Result<Vec<String>, AppError> {
    let summary = require_text(summary, "summary")?;
    if !(1..=MAX_BULLET_COUNT).contains(&count) {
        return Err(AppError::Validation(format!(
            "num_bullets must be between 1 and {MAX_BULLET_COUNT}"
        )));
    }

    let prompt = GENERATE_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{summary}", summary);
    let request = ChatRequest::new(&prompt, GENERATE_TEMPERATURE).with_system(GENERATE_SYSTEM);
    let raw = model.complete(request).await?;

    let mut bullets = clean_bullet_lines(&raw);
    bullets.truncate(count);
    debug!("Generated {} of {count} requested bullets", bullets.len());
    Ok(bullets)
}

/// Falls back to the original bullet when the model returns nothing usable.
pub async fn enhance_bullet(bullet: &str, model: &dyn ChatModel) -> Result<String, AppError> {
    let trimmed = require_text(bullet, "bullet")?;
    let prompt = ENHANCE_PROMPT_TEMPLATE.replace("{bullet}", trimmed);
    let request = ChatRequest::new(&prompt, ENHANCE_TEMPERATURE).with_system(ENHANCE_SYSTEM);
    let raw = model.complete(request).await?;

    let enhanced = clean_bullet_lines(&raw).join(" ");
    if enhanced.is_empty() {
        debug!("Enhancement came back empty; keeping the original bullet");
        return Ok(bullet.to_string());
    }
    Ok(enhanced)
}

/// Asks for `MORE_BULLET_COUNT` additions. Lines repeating an existing bullet
/// (ignoring case and spacing) are dropped, so fewer may come back.
pub async fn generate_more_bullets(
    existing: &[String],
    summary: &str,
    model: &dyn ChatModel,
) -> Result<Vec<String>, AppError> {
    let summary = require_text(summary, "summary")?;
    let prompt = MORE_PROMPT_TEMPLATE
        .replace("{count}", &MORE_BULLET_COUNT.to_string())
        .replace("{summary}", summary)
        .replace("{existing}", &existing.join("\n"));
    let request = ChatRequest::new(&prompt, MORE_TEMPERATURE).with_system(MORE_SYSTEM);
    let raw = model.complete(request).await?;

    let mut seen: Vec<String> = existing.iter().map(|b| dedup_key(b)).collect();
    let mut fresh = Vec::new();
    for bullet in clean_bullet_lines(&raw) {
        let key = dedup_key(&bullet);
        if !seen.contains(&key) {
            seen.push(key);
            fresh.push(bullet);
        }
    }
    Ok(fresh)
}

/// Splits model text into bullets: trims each line, strips list markers and
/// numbering, unwraps quotes, drops blanks.
pub fn clean_bullet_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .collect()
}

fn clean_line(line: &str) -> String {
    let mut rest = line.trim();
    loop {
        let before = rest;
        rest = unbold(rest);
        rest = strip_marker(rest);
        rest = strip_numbering(rest);
        if rest == before {
            break;
        }
    }
    unquote(rest).trim().to_string()
}

/// `*` only counts as a marker when followed by whitespace, so `**bold**`
/// and `*emphasis*` are left for `unbold`.
fn strip_marker(line: &str) -> &str {
    let Some(tail) = line.strip_prefix(&MARKERS[..]) else {
        return line;
    };
    let emphasis = line.starts_with('*')
        && tail.starts_with(|c: char| !c.is_whitespace())
        && !tail.trim_start_matches('*').trim().is_empty();
    if emphasis {
        line
    } else {
        tail.trim_start()
    }
}

/// `**text**` / `*text*` wrapping the whole line → `text`.
fn unbold(line: &str) -> &str {
    let hugs = |c: char| c.is_whitespace() || c == '*';
    for wrapper in ["**", "*"] {
        if let Some(inner) = line.strip_prefix(wrapper).and_then(|s| s.strip_suffix(wrapper)) {
            if inner.starts_with(|c: char| !hugs(c)) && inner.ends_with(|c: char| !hugs(c)) {
                return inner;
            }
        }
    }
    line
}

/// `"1. foo"` / `"2) foo"` → `"foo"`. Digits not followed by `.` or `)` and
/// whitespace are content (`"40% faster"`, `"3.5x"`) and stay.
fn strip_numbering(line: &str) -> &str {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return line;
    }
    let after = &line[digits..];
    match after.strip_prefix(&['.', ')'][..]) {
        Some(tail) if tail.is_empty() || tail.starts_with(char::is_whitespace) => tail.trim_start(),
        _ => line,
    }
}

fn unquote(line: &str) -> &str {
    for (open, close) in [('"', '"'), ('“', '”')] {
        if let Some(inner) = line.strip_prefix(open).and_then(|s| s.strip_suffix(close)) {
            return inner;
        }
    }
    line
}

fn dedup_key(bullet: &str) -> String {
    clean_line(bullet)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn require_text<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(trimmed)
}
