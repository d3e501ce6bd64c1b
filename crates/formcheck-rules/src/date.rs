//! Date validation against a `dd/mm/yyyy`-style template
//!
//! The template is turned into a pattern (`dd` two digits, `d` one or two,
//! `mm`/`m` likewise, `yyyy` four digits, everything else literal). A value
//! that matches is then split into day, month and year by the position of
//! each run in the template and checked against a simple calendar.

use regex::Regex;

use crate::error::EvaluationFault;

/// Check `value` against `template`
///
/// Returns `Ok(false)` for values that do not match or name an impossible
/// day. Fails when the template cannot locate a day, month or year.
///
/// # Examples
/// ```
/// use formcheck_rules::date::is_valid_date;
/// assert_eq!(is_valid_date("29/02/2024", "dd/mm/yyyy"), Ok(true));
/// assert_eq!(is_valid_date("29/02/2023", "dd/mm/yyyy"), Ok(false));
/// ```
pub fn is_valid_date(value: &str, template: &str) -> Result<bool, EvaluationFault> {
    let template = template.to_lowercase();
    let pattern = template_pattern(&template);
    let regex = Regex::new(&pattern).map_err(|e| EvaluationFault::InvalidPattern {
        template: template.clone(),
        reason: e.to_string(),
    })?;

    if !regex.is_match(value) {
        return Ok(false);
    }

    let value: Vec<char> = value.chars().collect();
    let layout: Vec<char> = adjust_template(&template, value.len()).chars().collect();

    let day = component(&layout, &value, 'd', 1, 2)
        .ok_or_else(|| missing(&template, "day"))?;
    let month = component(&layout, &value, 'm', 1, 2)
        .ok_or_else(|| missing(&template, "month"))?;
    let year = component(&layout, &value, 'y', 2, 4)
        .ok_or_else(|| missing(&template, "year"))?;

    Ok(is_calendar_date(day, month, year))
}

fn missing(template: &str, component: &'static str) -> EvaluationFault {
    EvaluationFault::DateTemplate {
        template: template.to_string(),
        component,
    }
}

/// Build an anchored pattern from a lower-cased template
fn template_pattern(template: &str) -> String {
    let mut pattern = String::from("^");
    let chars: Vec<char> = template.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|&&x| x == c).count();

        match c {
            'd' | 'm' => {
                for _ in 0..run / 2 {
                    pattern.push_str("([0-9]{2})");
                }
                if run % 2 == 1 {
                    pattern.push_str("([0-9]{1,2})");
                }
            }
            'y' => {
                for _ in 0..run / 4 {
                    pattern.push_str("([0-9]{4})");
                }
                pattern.push_str(&"y".repeat(run % 4));
            }
            _ => {
                let literal: String = chars[i..i + run].iter().collect();
                pattern.push_str(&regex::escape(&literal));
            }
        }

        i += run;
    }

    pattern.push('$');
    pattern
}

/// Widen single-letter day/month runs when the value length shows two digits were typed
fn adjust_template(template: &str, value_len: usize) -> String {
    match value_len {
        10 => widen(&widen(template, 'd'), 'm'),
        9 => widen(template, 'm'),
        _ => template.to_string(),
    }
}

fn widen(template: &str, c: char) -> String {
    let pair = format!("{c}{c}");
    template
        .replacen(&pair, "#", 1)
        .replacen(c, &pair, 1)
        .replacen('#', &pair, 1)
}

/// Read the number under the first run of `c` (between `min` and `max` long)
///
/// `None` when the layout has no such run. The inner option is `None` when the
/// characters under the run are not numeric.
fn component(layout: &[char], value: &[char], c: char, min: usize, max: usize) -> Option<Option<i64>> {
    let mut i = 0;
    while i < layout.len() {
        if layout[i] != c {
            i += 1;
            continue;
        }
        let run = layout[i..].iter().take_while(|&&x| x == c).count();
        if run >= min {
            let start = i.min(value.len());
            let end = (i + run.min(max)).min(value.len());
            let text: String = value[start..end].iter().collect();
            return Some(parse_int_prefix(&text));
        }
        i += run;
    }
    None
}

fn parse_int_prefix(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Day-in-month check with a `year % 4` leap rule
///
/// Unreadable components never fail a comparison, so a date with a garbled
/// part is only rejected by the checks that can still be made.
fn is_calendar_date(day: Option<i64>, month: Option<i64>, year: Option<i64>) -> bool {
    let day_over = |limit: i64| day.is_some_and(|d| d > limit);

    match month {
        Some(4 | 6 | 9 | 11) => !day_over(30),
        Some(2) => {
            let leap = year.is_some_and(|y| y % 4 == 0);
            !day_over(if leap { 29 } else { 28 })
        }
        Some(m) => !(day_over(31) || !(1..=12).contains(&m)),
        None => !day_over(31),
    }
}
