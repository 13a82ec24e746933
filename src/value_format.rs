use super::*;

const RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 4 * 1024 * 1024;

impl Value {
    /// Renders the value for diagnoses. Shared references that point back into
    /// the value being rendered print as `[Circular]`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let mut ancestors = Vec::new();
        write_value(self, &mut ancestors, &mut out);
        out
    }
}

fn write_value(value: &Value, ancestors: &mut Vec<*const ()>, out: &mut String) {
    match value {
        Value::Undefined => out.push_str("undefined"),
        Value::Null => out.push_str("null"),
        Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
        Value::Number(v) => out.push_str(&v.to_string()),
        Value::Float(v) => out.push_str(&format_float(*v)),
        Value::BigInt(v) => {
            out.push_str(&v.to_string());
            out.push('n');
        }
        Value::String(v) => out.push_str(&format!("{v:?}")),
        Value::Date(v) => {
            out.push_str("Date(");
            out.push_str(&format_iso_8601_utc(*v.borrow()));
            out.push(')');
        }
        Value::RegExp(pattern) => out.push_str(&pattern.to_string()),
        Value::Array(array) => {
            let ptr = Rc::as_ptr(array) as *const ();
            write_nested(ptr, ancestors, out, |ancestors, out| {
                write_sequence(&array.borrow(), ancestors, out);
            });
        }
        Value::Arguments(array) => {
            let ptr = Rc::as_ptr(array) as *const ();
            write_nested(ptr, ancestors, out, |ancestors, out| {
                out.push_str("Arguments ");
                write_sequence(&array.borrow(), ancestors, out);
            });
        }
        Value::Object(object) => {
            let ptr = Rc::as_ptr(object) as *const ();
            write_nested(ptr, ancestors, out, |ancestors, out| {
                let object = object.borrow();
                if object.is_empty() {
                    out.push_str("{}");
                    return;
                }
                out.push('{');
                for (idx, (key, entry)) in object.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    write_key(key, out);
                    out.push_str(": ");
                    write_value(entry, ancestors, out);
                }
                out.push('}');
            });
        }
    }
}

fn write_nested(
    ptr: *const (),
    ancestors: &mut Vec<*const ()>,
    out: &mut String,
    body: impl FnOnce(&mut Vec<*const ()>, &mut String),
) {
    if ancestors.contains(&ptr) {
        out.push_str("[Circular]");
        return;
    }
    ancestors.push(ptr);
    stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || body(ancestors, out));
    ancestors.pop();
}

fn write_sequence(array: &ArrayValue, ancestors: &mut Vec<*const ()>, out: &mut String) {
    out.push('[');
    let mut first = true;
    for element in array.iter() {
        if !first {
            out.push_str(", ");
        }
        first = false;
        write_value(element, ancestors, out);
    }
    for (key, entry) in array.properties.iter() {
        if !first {
            out.push_str(", ");
        }
        first = false;
        write_key(key, out);
        out.push_str(": ");
        write_value(entry, ancestors, out);
    }
    out.push(']');
}

fn write_key(key: &str, out: &mut String) {
    let plain = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$');
    if plain {
        out.push_str(key);
    } else {
        out.push_str(&format!("{key:?}"));
    }
}

pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == f64::INFINITY {
        return "Infinity".to_string();
    }
    if value == f64::NEG_INFINITY {
        return "-Infinity".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let raw = format!("{value}");
    let Some(exp_idx) = raw.find('e').or_else(|| raw.find('E')) else {
        return raw;
    };
    let mantissa = &raw[..exp_idx];
    let exponent_src = &raw[exp_idx + 1..];
    let exponent = exponent_src.parse::<i32>().unwrap_or(0);
    format!("{mantissa}e{:+}", exponent)
}

pub(crate) fn format_iso_8601_utc(timestamp_ms: i64) -> String {
    let days = timestamp_ms.div_euclid(86_400_000);
    let rem = timestamp_ms.rem_euclid(86_400_000);
    let hour = rem / 3_600_000;
    let minute = (rem % 3_600_000) / 60_000;
    let second = (rem % 60_000) / 1_000;
    let millisecond = rem % 1_000;
    let (year, month, day) = civil_from_days(days);
    let year_str = if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else if year < 0 {
        format!("-{:06}", -(year as i128))
    } else {
        format!("+{:06}", year)
    };
    format!("{year_str}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{millisecond:03}Z")
}

fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096).div_euclid(365);
    let mut year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2).div_euclid(153);
    let day = (doy - (153 * mp + 2).div_euclid(5) + 1) as u32;
    let month = (mp + if mp < 10 { 3 } else { -9 }) as u32;
    if month <= 2 {
        year += 1;
    }
    (year, month, day)
}
