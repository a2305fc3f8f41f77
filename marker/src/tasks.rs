//! The four task rule sets for this lab.
//!
//! Each task evaluates an ordered list of named requirements against the
//! comment-stripped submission. Evaluation is total: every requirement runs
//! regardless of earlier failures, so the checklist always shows the full
//! picture. Labels and patterns are fixed — they are the published marking
//! scheme for this assignment.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::detectors;
use crate::scorer::score_from_requirements;
use crate::types::{Requirement, TaskResult};

/// Marks available for each task.
pub const TASK_MAX: u32 = 20;

const TASK_NAMES: [&str; 4] = ["TODO 1", "TODO 2", "TODO 3", "TODO 4"];

static CLICKED_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)clicked").unwrap());

static QUOTE_ENDPOINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)dummyjson\.com/quotes/random").unwrap());
static DATA_CONTENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bdata\s*\.\s*content\b").unwrap());
static DATA_QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bdata\s*\.\s*quote\b").unwrap());
static DATA_AUTHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bdata\s*\.\s*author\b").unwrap());

static DAMMAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)dammam").unwrap());
static WEATHER_API: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)openweathermap\.org",
        r"(?i)api\.openweathermap\.org",
        r"(?i)weather",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});
static MAIN_TEMP: Lazy<Vec<Regex>> = Lazy::new(|| field_pair("main", "temp"));
static MAIN_HUMIDITY: Lazy<Vec<Regex>> = Lazy::new(|| field_pair("main", "humidity"));
static WIND_SPEED: Lazy<Vec<Regex>> = Lazy::new(|| field_pair("wind", "speed"));

/// Patterns for a nested response-field read, with and without a leading
/// `data.` receiver.
fn field_pair(outer: &str, inner: &str) -> Vec<Regex> {
    [
        format!(r"(?i)\bdata\s*\.\s*{outer}\s*\.\s*{inner}\b"),
        format!(r"(?i)\b{outer}\s*\.\s*{inner}\b"),
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
}

fn any(code: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|re| re.is_match(code))
}

fn finish(name: &str, requirements: Vec<Requirement>) -> TaskResult {
    let earned = score_from_requirements(&requirements, TASK_MAX);
    TaskResult {
        name: name.to_string(),
        earned,
        max: TASK_MAX,
        requirements,
    }
}

/// Evaluate all four tasks, in report order.
pub fn check_all(code: &str) -> Vec<TaskResult> {
    vec![
        check_todo1(code),
        check_todo2(code),
        check_todo3(code),
        check_todo4(code),
    ]
}

/// TODO 1: generic DOM wiring — a selection, a click handler, a text update.
pub fn check_todo1(code: &str) -> TaskResult {
    let requirements = vec![
        Requirement::new(
            "Uses DOM selection (getElementById/querySelector/etc.)",
            detectors::has_dom_selection(code),
        ),
        Requirement::new(
            "Handles a user interaction (click handler)",
            detectors::has_click_handler(code),
        ),
        Requirement::new(
            "Updates the page (textContent/innerText/innerHTML/etc.)",
            detectors::has_text_update(code),
        ),
    ];
    finish(TASK_NAMES[0], requirements)
}

/// TODO 2: the `t2-btn` button updates the `t2-status` text.
pub fn check_todo2(code: &str) -> TaskResult {
    let requirements = vec![
        Requirement::new(
            r#"References button id "t2-btn""#,
            detectors::mentions_id(code, "t2-btn"),
        ),
        Requirement::new("Attaches a click handler", detectors::has_click_handler(code)),
        Requirement::new(
            r#"References status id "t2-status""#,
            detectors::mentions_id(code, "t2-status"),
        ),
        Requirement::new(
            "Changes the status text (textContent/innerText/innerHTML)",
            detectors::has_text_update(code),
        ),
        Requirement::with_detail(
            r#"Contains expected message (loose match for "clicked")"#,
            CLICKED_KEYWORD.is_match(code),
            r#"the status message should include the word "clicked""#,
        ),
    ];
    finish(TASK_NAMES[1], requirements)
}

/// TODO 3: fetch a random quote and display quote text plus author.
pub fn check_todo3(code: &str) -> TaskResult {
    let reads_quote_fields =
        (DATA_CONTENT.is_match(code) || DATA_QUOTE.is_match(code)) && DATA_AUTHOR.is_match(code);

    let requirements = vec![
        Requirement::new(
            r#"References button id "t3-loadQuote""#,
            detectors::mentions_id(code, "t3-loadQuote"),
        ),
        Requirement::new("Attaches a click handler", detectors::has_click_handler(code)),
        Requirement::new(
            "Uses fetch/axios/XHR to call an API",
            detectors::has_fetch_like(code),
        ),
        Requirement::with_detail(
            "Calls the random quote endpoint (dummyjson.com/quotes/random) (loose)",
            QUOTE_ENDPOINT.is_match(code),
            "expected a call to dummyjson.com/quotes/random",
        ),
        Requirement::new(
            "Handles async result (await/then)",
            detectors::has_async_handling(code),
        ),
        Requirement::new(
            r#"References quote output id "t3-quote""#,
            detectors::mentions_id(code, "t3-quote"),
        ),
        Requirement::new(
            r#"References author output id "t3-author""#,
            detectors::mentions_id(code, "t3-author"),
        ),
        Requirement::with_detail(
            "Uses quote text field (content OR quote) and author field",
            reads_quote_fields,
            "looked for data.content or data.quote plus data.author",
        ),
        Requirement::new(
            "Updates DOM with the fetched values",
            detectors::has_text_update(code),
        ),
    ];
    finish(TASK_NAMES[2], requirements)
}

/// TODO 4: fetch Dammam weather and display temperature, humidity and wind.
pub fn check_todo4(code: &str) -> TaskResult {
    let calls_weather_api = DAMMAM.is_match(code) && any(code, &WEATHER_API);
    let reads_weather_fields =
        any(code, &MAIN_TEMP) && any(code, &MAIN_HUMIDITY) && any(code, &WIND_SPEED);

    let requirements = vec![
        Requirement::new(
            r#"References button id "t4-loadWx""#,
            detectors::mentions_id(code, "t4-loadWx"),
        ),
        Requirement::new("Attaches a click handler", detectors::has_click_handler(code)),
        Requirement::new(
            "Uses fetch/axios/XHR to call an API",
            detectors::has_fetch_like(code),
        ),
        Requirement::with_detail(
            "Calls a weather API for Dammam (loose)",
            calls_weather_api,
            r#"looked for "Dammam" together with a weather API reference"#,
        ),
        Requirement::new(
            "Handles async result (await/then)",
            detectors::has_async_handling(code),
        ),
        Requirement::new(
            r#"References output id "t4-temp""#,
            detectors::mentions_id(code, "t4-temp"),
        ),
        Requirement::new(
            r#"References output id "t4-hum""#,
            detectors::mentions_id(code, "t4-hum"),
        ),
        Requirement::new(
            r#"References output id "t4-wind""#,
            detectors::mentions_id(code, "t4-wind"),
        ),
        Requirement::with_detail(
            "Reads temperature/humidity/wind from response (typical fields)",
            reads_weather_fields,
            "looked for main.temp, main.humidity and wind.speed reads",
        ),
        Requirement::new(
            "Updates DOM with the fetched values",
            detectors::has_text_update(code),
        ),
    ];
    finish(TASK_NAMES[3], requirements)
}

/// Zeroed results for a missing or empty submission. Detectors never run in
/// this case; each task carries a single synthetic failing requirement so
/// the report still explains the zero.
pub fn missing_submission_results() -> Vec<TaskResult> {
    TASK_NAMES
        .iter()
        .map(|name| TaskResult {
            name: name.to_string(),
            earned: 0,
            max: TASK_MAX,
            requirements: vec![Requirement::new(
                "No submission / empty script.js → cannot grade TODOs",
                false,
            )],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_TODO2: &str = r#"
        const btn = document.getElementById("t2-btn");
        btn.addEventListener("click", () => {
            document.getElementById("t2-status").textContent = "Button clicked!";
        });
    "#;

    const FULL_TODO3: &str = r#"
        document.getElementById("t3-loadQuote").addEventListener("click", async () => {
            const res = await fetch("https://dummyjson.com/quotes/random");
            const data = await res.json();
            document.getElementById("t3-quote").textContent = data.quote;
            document.getElementById("t3-author").textContent = data.author;
        });
    "#;

    const FULL_TODO4: &str = r#"
        document.getElementById("t4-loadWx").addEventListener("click", async () => {
            const url = "https://api.openweathermap.org/data/2.5/weather?q=Dammam&appid=demo";
            const res = await fetch(url);
            const data = await res.json();
            document.getElementById("t4-temp").textContent = data.main.temp;
            document.getElementById("t4-hum").textContent = data.main.humidity;
            document.getElementById("t4-wind").textContent = data.wind.speed;
        });
    "#;

    #[test]
    fn todo1_full_marks_for_complete_wiring() {
        let result = check_todo1(FULL_TODO2);
        assert_eq!(result.earned, 20);
        assert_eq!(result.requirements.len(), 3);
        assert!(result.requirements.iter().all(|r| r.satisfied));
    }

    #[test]
    fn todo1_zero_for_unrelated_code() {
        let result = check_todo1("const x = 40 + 2; function noop() { return x; }");
        assert_eq!(result.earned, 0);
        assert!(result.requirements.iter().all(|r| !r.satisfied));
    }

    #[test]
    fn todo2_full_marks_for_exact_solution() {
        let result = check_todo2(FULL_TODO2);
        assert_eq!(result.earned, 20);
        assert_eq!(result.requirements.len(), 5);
        assert!(result.requirements.iter().all(|r| r.satisfied));
    }

    #[test]
    fn todo2_partial_credit_without_keyword() {
        let src = r#"
            const btn = document.getElementById("t2-btn");
            btn.addEventListener("click", () => {
                document.getElementById("t2-status").textContent = "pressed";
            });
        "#;
        let result = check_todo2(src);
        // 4 of 5: round(20 * 4 / 5) = 16.
        assert_eq!(result.earned, 16);
        let missed: Vec<_> = result
            .requirements
            .iter()
            .filter(|r| !r.satisfied)
            .collect();
        assert_eq!(missed.len(), 1);
        assert!(missed[0].label.contains("clicked"));
        assert!(!missed[0].failure_detail.is_empty());
    }

    #[test]
    fn todo3_full_marks_for_exact_solution() {
        let result = check_todo3(FULL_TODO3);
        assert_eq!(result.earned, 20);
        assert_eq!(result.requirements.len(), 9);
        assert!(result.requirements.iter().all(|r| r.satisfied));
    }

    #[test]
    fn todo3_three_of_nine_rounds_to_seven() {
        // Satisfies exactly: click handler, fetch-like call, async handling.
        let src = r#"
            document.body.addEventListener("click", () => {
                fetch("https://example.com/other").then((res) => res.status);
            });
        "#;
        let result = check_todo3(src);
        let satisfied = result.requirements.iter().filter(|r| r.satisfied).count();
        assert_eq!(satisfied, 3);
        assert_eq!(result.earned, 7);
    }

    #[test]
    fn todo3_accepts_content_field_variant() {
        let src = FULL_TODO3.replace("data.quote", "data.content");
        let result = check_todo3(&src);
        assert_eq!(result.earned, 20);
    }

    #[test]
    fn todo4_full_marks_for_exact_solution() {
        let result = check_todo4(FULL_TODO4);
        assert_eq!(result.earned, 20);
        assert_eq!(result.requirements.len(), 10);
        assert!(result.requirements.iter().all(|r| r.satisfied));
    }

    #[test]
    fn todo4_weather_check_needs_both_location_and_api() {
        let location_only = r#"const city = "Dammam";"#;
        let result = check_todo4(location_only);
        let weather_req = &result.requirements[3];
        assert!(weather_req.label.contains("weather API"));
        assert!(!weather_req.satisfied);

        let both = r#"fetch("https://api.openweathermap.org/?q=Dammam")"#;
        let result = check_todo4(both);
        assert!(result.requirements[3].satisfied);
    }

    #[test]
    fn todo4_field_reads_accept_bare_receivers() {
        let src = r#"
            const wx = { main: { temp: 1, humidity: 2 }, wind: { speed: 3 } };
            show(wx.main.temp, wx.main.humidity, wx.wind.speed);
        "#;
        let result = check_todo4(src);
        assert!(result.requirements[8].satisfied);
    }

    #[test]
    fn every_requirement_is_always_evaluated() {
        // No short-circuiting: a submission failing the first requirement
        // still gets the later ones checked (and credited).
        let src = r#"
            someButton.addEventListener("click", () => {
                out.textContent = "Button clicked";
            });
        "#;
        let result = check_todo2(src);
        assert!(!result.requirements[0].satisfied);
        assert!(result.requirements[1].satisfied);
        assert!(result.requirements[3].satisfied);
        assert!(result.requirements[4].satisfied);
    }

    #[test]
    fn missing_submission_results_are_all_zero() {
        let results = missing_submission_results();
        assert_eq!(results.len(), 4);
        for (result, name) in results.iter().zip(TASK_NAMES) {
            assert_eq!(result.name, name);
            assert_eq!(result.earned, 0);
            assert_eq!(result.max, 20);
            assert_eq!(result.requirements.len(), 1);
            assert!(!result.requirements[0].satisfied);
        }
    }
}
