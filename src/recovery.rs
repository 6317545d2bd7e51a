//! Turning untrusted model text into validated quiz questions.
//!
//! Stages, each usable on its own:
//!   1. `strip_fences`       remove ``` / ```json code fences
//!   2. `json_candidates`    narrow to the JSON array/object, dropping chatter around it
//!   3. strict `serde_json` parse
//!   4. `repair_json`        drop trailing commas, escape stray quotes and raw newlines
//!   5. `normalize`          keep well-formed items, clamp and remap indices, assign ids
//!
//! `recover_questions` composes them, retrying from each later `[`/`{` until
//! some candidate yields at least one question.

use serde_json::Value;
use thiserror::Error;

use crate::domain::QuizQuestion;

/// Highest answer index a question may carry (four options: 0..=3).
pub const MAX_ANSWER_INDEX: usize = 3;

#[derive(Debug, Error)]
pub enum RecoveryError {
  #[error("no JSON array or object found in model output")]
  NoJson,
  #[error("model output is not valid JSON even after repair: {0}")]
  Malformed(#[from] serde_json::Error),
  #[error("parsed JSON contains no valid questions")]
  NoQuestions,
}

/// Full pipeline: raw model text in, non-empty list of valid questions out.
///
/// Every `[`/`{` in the text is tried as a payload start, so a bracketed
/// aside in leading chatter (`Here are the [10] questions:`) does not hide the
/// real array. The error reported is the one from the first start.
pub fn recover_questions(raw: &str) -> Result<Vec<QuizQuestion>, RecoveryError> {
  let body = strip_fences(raw);
  let mut first_err = None;
  for (start, _) in body.match_indices(|c: char| c == '[' || c == '{') {
    let outcome = parse_payload(&body[start..]).and_then(|value| {
      let questions = normalize(&value);
      if questions.is_empty() {
        Err(RecoveryError::NoQuestions)
      } else {
        Ok(questions)
      }
    });
    match outcome {
      Ok(questions) => return Ok(questions),
      Err(e) => {
        first_err.get_or_insert(e);
      }
    }
  }
  Err(first_err.unwrap_or(RecoveryError::NoJson))
}

/// Stages 2-4: strict parse, then repaired parse, of each candidate span in `text`.
fn parse_payload(text: &str) -> Result<Value, RecoveryError> {
  let candidates = json_candidates(text);
  if candidates.is_empty() {
    return Err(RecoveryError::NoJson);
  }

  let mut last_err = None;
  for candidate in candidates {
    match serde_json::from_str::<Value>(candidate) {
      Ok(v) => return Ok(v),
      Err(_) => match serde_json::from_str::<Value>(&repair_json(candidate)) {
        Ok(v) => return Ok(v),
        Err(e) => last_err = Some(e),
      },
    }
  }
  match last_err {
    Some(e) => Err(RecoveryError::Malformed(e)),
    None => Err(RecoveryError::NoJson),
  }
}

/// Trim and remove a Markdown code fence (with or without a language tag).
/// Text before an opening fence is discarded; a missing closing fence is tolerated.
pub fn strip_fences(raw: &str) -> &str {
  let text = raw.trim();
  let Some(open) = text.find("```") else {
    return text;
  };
  let after = &text[open + 3..];
  // language tag, e.g. ```json
  let tag_len = after.find(|c: char| !c.is_ascii_alphanumeric()).unwrap_or(after.len());
  let inner = &after[tag_len..];
  match inner.find("```") {
    Some(close) => inner[..close].trim(),
    None => inner.trim(),
  }
}

/// Substrings that may hold the JSON payload, most likely first.
///
/// The first candidate runs from the first `[`/`{` to its balanced closer
/// (string-aware). If that differs from the span ending at the last matching
/// closer, the wider span is offered too; it survives quote damage that can
/// confuse the balanced scan.
pub fn json_candidates(text: &str) -> Vec<&str> {
  let Some(start) = text.find(|c: char| c == '[' || c == '{') else {
    return vec![];
  };
  let close = if text[start..].starts_with('[') { ']' } else { '}' };

  let mut out = Vec::with_capacity(2);
  if let Some(end) = balanced_end(&text[start..]) {
    out.push(&text[start..start + end]);
  }
  if let Some(last) = text.rfind(close).filter(|&i| i > start) {
    let wide = &text[start..=last];
    if out.first() != Some(&wide) {
      out.push(wide);
    }
  }
  out
}

/// Byte length of the balanced bracket group that `s` starts with.
fn balanced_end(s: &str) -> Option<usize> {
  let mut depth = 0usize;
  let mut in_str = false;
  let mut escaped = false;
  for (i, c) in s.char_indices() {
    if in_str {
      match c {
        _ if escaped => escaped = false,
        '\\' => escaped = true,
        '"' => in_str = false,
        _ => {}
      }
      continue;
    }
    match c {
      '"' => in_str = true,
      '[' | '{' => depth += 1,
      ']' | '}' => {
        depth = depth.checked_sub(1)?;
        if depth == 0 {
          return Some(i + 1);
        }
      }
      _ => {}
    }
  }
  None
}

/// Best-effort repair of near-JSON.
///
/// - commas directly before `]` or `}` are dropped
/// - a `"` inside a string that is not followed by `,` `:` `]` `}` or end of input
///   is treated as content and escaped
/// - raw newlines/tabs inside strings are escaped
///
/// Existing escape sequences are left untouched.
pub fn repair_json(s: &str) -> String {
  let chars: Vec<char> = s.chars().collect();
  let mut out = String::with_capacity(s.len() + 16);
  let mut in_str = false;
  let mut escaped = false;

  for (i, &c) in chars.iter().enumerate() {
    if in_str {
      if escaped {
        escaped = false;
        out.push(c);
        continue;
      }
      match c {
        '\\' => {
          escaped = true;
          out.push(c);
        }
        '"' if closes_string(&chars[i + 1..]) => {
          in_str = false;
          out.push(c);
        }
        '"' => out.push_str("\\\""),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        _ => out.push(c),
      }
      continue;
    }
    match c {
      '"' => {
        in_str = true;
        out.push(c);
      }
      ',' if matches!(next_significant(&chars[i + 1..]), Some(']') | Some('}')) => {}
      _ => out.push(c),
    }
  }
  out
}

fn next_significant(rest: &[char]) -> Option<char> {
  rest.iter().copied().find(|c| !c.is_whitespace())
}

fn closes_string(rest: &[char]) -> bool {
  matches!(next_significant(rest), None | Some(',') | Some(':') | Some(']') | Some('}'))
}

/// Stage 5: loosely-typed JSON to validated questions.
///
/// Accepts a bare array or an object wrapping it under `questions` or `data`.
/// Invalid items are dropped; ids are assigned 0.. over the survivors.
pub fn normalize(value: &Value) -> Vec<QuizQuestion> {
  let items: &[Value] = match value {
    Value::Array(items) => items.as_slice(),
    Value::Object(map) => match map.get("questions").or_else(|| map.get("data")) {
      Some(Value::Array(items)) => items.as_slice(),
      _ => &[],
    },
    _ => &[],
  };

  items
    .iter()
    .filter_map(normalize_item)
    .enumerate()
    .map(|(id, mut q)| {
      q.id = id;
      q
    })
    .collect()
}

fn normalize_item(item: &Value) -> Option<QuizQuestion> {
  let obj = item.as_object()?;

  let question = obj.get("question")?.as_str()?.trim();
  if question.is_empty() {
    return None;
  }

  let raw_options = obj.get("options")?.as_array()?;
  // (position in the model's array, cleaned text)
  let kept: Vec<(usize, &str)> = raw_options
    .iter()
    .enumerate()
    .filter_map(|(i, o)| Some((i, o.as_str()?.trim())))
    .filter(|(_, o)| !o.is_empty())
    .collect();
  if kept.len() < 2 {
    return None;
  }

  let raw_index = obj.get("correctAnswerIndex")?;
  let index = raw_index
    .as_i64()
    .or_else(|| raw_index.as_f64().map(|f| f.floor() as i64))?;
  let max_index = MAX_ANSWER_INDEX.min(raw_options.len() - 1);
  let marked = clamp_index(index, max_index);
  // The marked option must survive cleaning; its new slot is the answer.
  let correct_answer_index = kept.iter().position(|&(i, _)| i == marked)?;
  let options: Vec<String> = kept.into_iter().map(|(_, o)| o.to_string()).collect();

  let explanation = match obj.get("explanation") {
    None | Some(Value::Null) => String::new(),
    Some(Value::String(s)) => s.trim().to_string(),
    Some(other) => other.to_string(),
  };

  Some(QuizQuestion { id: 0, question: question.to_string(), options, correct_answer_index, explanation })
}

fn clamp_index(index: i64, max_index: usize) -> usize {
  if index <= 0 {
    0
  } else {
    (index as u64).min(max_index as u64) as usize
  }
}
