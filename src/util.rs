//! Small text helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values, in order.
/// Literal braces that don't name a key are left alone.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// First `max` characters of `s` (chars, not bytes).
pub fn truncate_chars(s: &str, max: usize) -> &str {
  match s.char_indices().nth(max) {
    Some((idx, _)) => &s[..idx],
    None => s,
  }
}

/// Log-safe truncation for large strings.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  let head = truncate_chars(s, max);
  if head.len() == s.len() { s.to_string() } else { format!("{}… ({} bytes total)", head, s.len()) }
}

const FENCE: &str = "```";

/// Remove a markdown code fence wrapped around a model reply.
///
/// Accepted forms (after trimming surrounding whitespace):
/// - no fence: returned as is;
/// - "```" or "```json" (any language tag, spaces allowed before it) on its own
///   line, the body, then a closing "```" line: the body is returned
///   byte-identical, without the newlines that belong to the fence lines.
///   Anything after the closing fence is dropped;
/// - no closing fence (truncated reply): only the opening fence is removed;
/// - "```[...]```" or "```json [...] ```" on a single line: the trimmed bytes
///   between the markers.
pub fn strip_code_fence(reply: &str) -> &str {
  let s = reply.trim();
  let Some(rest) = s.strip_prefix(FENCE) else {
    return s;
  };

  if let Some(nl) = rest.find('\n') {
    if is_fence_tag(rest[..nl].trim()) {
      let body = &rest[nl + 1..];
      if body.starts_with(FENCE) {
        return "";
      }
      return match body.find("\n```") {
        Some(end) => {
          let inner = &body[..end];
          inner.strip_suffix('\r').unwrap_or(inner)
        }
        None => body,
      };
    }
  }

  // body starts on the opening line, optionally after a language tag
  let rest = rest.trim_start();
  let rest = match rest.split_once(char::is_whitespace) {
    Some((tag, tail)) if is_fence_tag(tag) => tail,
    _ => rest,
  };
  match rest.find(FENCE) {
    Some(end) => rest[..end].trim(),
    None => rest.trim(),
  }
}

fn is_fence_tag(word: &str) -> bool {
  word.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}
