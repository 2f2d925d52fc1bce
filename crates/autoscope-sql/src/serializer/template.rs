use super::{Formatter, Params, ToSql};

use autoscope_core::stmt::Value;

/// A condition template and the values for its `?` placeholders.
///
/// `?` inside single-quoted string literals is literal text.
pub(super) struct Template<'a>(pub(super) &'a str, pub(super) &'a [Value]);

impl Template<'_> {
    pub(super) fn placeholders(&self) -> usize {
        let mut quoted = false;
        let mut count = 0;

        for ch in self.0.chars() {
            match ch {
                '\'' => quoted = !quoted,
                '?' if !quoted => count += 1,
                _ => {}
            }
        }

        count
    }
}

impl ToSql for Template<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let Template(template, values) = self;
        let mut values = values.iter();
        let mut quoted = false;

        for ch in template.chars() {
            match ch {
                '\'' => {
                    quoted = !quoted;
                    f.dst.push(ch);
                }
                // Counts are checked before serializing
                '?' if !quoted => match values.next() {
                    Some(value) => {
                        let placeholder = f.params.push(value);
                        fmt!(f, placeholder);
                    }
                    None => f.dst.push(ch),
                },
                ch => f.dst.push(ch),
            }
        }
    }
}
