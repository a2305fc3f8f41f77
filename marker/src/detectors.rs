//! Pattern detectors: pure predicates over submitted source text.
//!
//! Each detector is an "any of these patterns" check over case-insensitive
//! regexes. They intentionally stay textual rather than parsing the source —
//! cheap, and tolerant of student stylistic variation. That tolerance cuts
//! both ways; see [`mentions_id`] for the documented false-positive trade.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

fn any_match(code: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|re| re.is_match(code))
}

static DOM_SELECTION: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)getElementById\s*\(",
        r"(?i)querySelector(All)?\s*\(",
        r"(?i)document\s*\.\s*getElementsBy",
    ])
});

static CLICK_HANDLER: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r#"(?i)addEventListener\s*\(\s*["'`]click["'`]"#,
        r"(?i)\.onclick\s*=",
        r"(?i)onClick\s*=",
    ])
});

static TEXT_UPDATE: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)\.textContent\s*=",
        r"(?i)\.innerText\s*=",
        r"(?i)\.innerHTML\s*=",
        r"(?i)\.append\s*\(",
        r"(?i)\.insertAdjacentText\s*\(",
    ])
});

static FETCH_LIKE: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)\bfetch\s*\(",
        r"(?i)\baxios\s*\.\s*get\s*\(",
        r"(?i)\bXMLHttpRequest\b",
    ])
});

static ASYNC_HANDLING: Lazy<Vec<Regex>> =
    Lazy::new(|| compile(&[r"(?i)\bawait\b", r"(?i)\.then\s*\(", r"(?i)\basync\b"]));

/// Any common element-lookup call shape.
pub fn has_dom_selection(code: &str) -> bool {
    any_match(code, &DOM_SELECTION)
}

/// Click-event registration, or assignment to an `onclick`-style property.
pub fn has_click_handler(code: &str) -> bool {
    any_match(code, &CLICK_HANDLER)
}

/// Assignment to a text/HTML content property, or an appending text call.
pub fn has_text_update(code: &str) -> bool {
    any_match(code, &TEXT_UPDATE)
}

/// A fetch call, an axios GET, or direct XMLHttpRequest use.
pub fn has_fetch_like(code: &str) -> bool {
    any_match(code, &FETCH_LIKE)
}

/// An await expression, a `.then(` continuation, or an async marker.
pub fn has_async_handling(code: &str) -> bool {
    any_match(code, &ASYNC_HANDLING)
}

/// Whether the source references the given element id.
///
/// Matches a by-id lookup with the literal id, `querySelector`/
/// `querySelectorAll` with `#id`, an `id === "<id>"` comparison, or — the
/// loose fallback — the quoted identifier anywhere in the source. The
/// fallback tolerates lookups stashed in helper functions or data tables at
/// the cost of false positives (the id appearing in an unrelated string
/// still counts). Historical grading depends on that looseness; do not
/// tighten it.
pub fn mentions_id(code: &str, id: &str) -> bool {
    let safe = regex::escape(id);
    let patterns = [
        format!(r#"(?i)getElementById\s*\(\s*["'`]{safe}["'`]\s*\)"#),
        format!(r##"(?i)querySelector\s*\(\s*["'`]\#{safe}["'`]\s*\)"##),
        format!(r##"(?i)querySelectorAll\s*\(\s*["'`]\#{safe}["'`]\s*\)"##),
        format!(r#"(?i)\bid\s*===\s*["'`]{safe}["'`]"#),
        format!(r#"(?i)["'`]{safe}["'`]"#),
    ];

    // An id that somehow produces an invalid pattern simply never matches.
    patterns
        .iter()
        .any(|p| Regex::new(p).map(|re| re.is_match(code)).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_selection_shapes() {
        assert!(has_dom_selection(r#"document.getElementById("x")"#));
        assert!(has_dom_selection(r#"document.querySelector(".btn")"#));
        assert!(has_dom_selection(r#"document.querySelectorAll("li")"#));
        assert!(has_dom_selection(r#"document.getElementsByClassName("x")"#));
        assert!(!has_dom_selection("const x = 1;"));
    }

    #[test]
    fn click_handler_shapes() {
        assert!(has_click_handler(r#"btn.addEventListener("click", fn)"#));
        assert!(has_click_handler(r#"btn.addEventListener( 'click', fn)"#));
        assert!(has_click_handler("btn.onclick = fn"));
        assert!(!has_click_handler(r#"btn.addEventListener("keyup", fn)"#));
    }

    #[test]
    fn text_update_shapes() {
        assert!(has_text_update("el.textContent = 'hi'"));
        assert!(has_text_update("el.innerText='hi'"));
        assert!(has_text_update("el.innerHTML = html"));
        assert!(has_text_update("el.append(node)"));
        assert!(has_text_update("el.insertAdjacentText('beforeend', t)"));
        assert!(!has_text_update("const text = el.textContent;"));
    }

    #[test]
    fn fetch_like_shapes() {
        assert!(has_fetch_like(r#"fetch("https://api.example.com")"#));
        assert!(has_fetch_like("axios.get(url)"));
        assert!(has_fetch_like("new XMLHttpRequest()"));
        assert!(!has_fetch_like("prefetched(data)"));
    }

    #[test]
    fn async_handling_shapes() {
        assert!(has_async_handling("const data = await res.json();"));
        assert!(has_async_handling("p.then((r) => r)"));
        assert!(has_async_handling("async function load() {}"));
        assert!(!has_async_handling("const waiter = 1;"));
    }

    #[test]
    fn mentions_id_by_lookup_shapes() {
        assert!(mentions_id(r#"document.getElementById("t2-btn")"#, "t2-btn"));
        assert!(mentions_id(r##"document.querySelector("#t2-btn")"##, "t2-btn"));
        assert!(mentions_id(r#"document.querySelectorAll('#t2-btn')"#, "t2-btn"));
        assert!(mentions_id(r#"if (el.id === "t2-btn") {}"#, "t2-btn"));
    }

    #[test]
    fn mentions_id_loose_fallback_matches_any_quoted_occurrence() {
        assert!(mentions_id(r#"const target = "t2-btn";"#, "t2-btn"));
        // Known false positive, accepted on purpose: the quoted id in an
        // unrelated string still counts.
        assert!(mentions_id(r#"const labels = ["t2-btn", "other"];"#, "t2-btn"));
    }

    #[test]
    fn mentions_id_requires_quoting_somewhere() {
        assert!(!mentions_id("const t2btn = 1;", "t2-btn"));
        assert!(!mentions_id(r#"document.getElementById("other")"#, "t2-btn"));
    }

    #[test]
    fn mentions_id_escapes_regex_metacharacters() {
        assert!(mentions_id(r#"getElementById("a.b(c)")"#, "a.b(c)"));
        assert!(!mentions_id(r#"getElementById("aXb(c)")"#, "a.b(c)"));
    }
}
