//! Textual representation.
//!
//! An applied call renders as its target, its left arguments, the
//! placeholder token, its right arguments and its keywords:
//!
//! ```text
//! partial(<function digits>, 1, ..., 3, scale=2)
//! ```
//!
//! Rendering is cycle-safe. An applied call or slot that is reached again
//! while it is still being rendered prints as `...`.

use std::fmt::{self, Display, Formatter, Write};

use super::applied::Applied;
use super::guard::RecursionGuard;
use super::value::{Slot, Value};

const CYCLE_MARKER: &str = "...";

fn write_separated<'a, I>(formatter: &mut Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a Value>,
{
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            formatter.write_str(", ")?;
        }
        write!(formatter, "{item}")?;
    }
    Ok(())
}

impl Display for Value {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => formatter.write_str("None"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value:?}"),
            Self::Str(value) => write!(formatter, "{:?}", &**value),
            Self::Tuple(items) => {
                formatter.write_char('(')?;
                write_separated(formatter, items.iter())?;
                if items.len() == 1 {
                    formatter.write_char(',')?;
                }
                formatter.write_char(')')
            }
            Self::List(items) => {
                formatter.write_char('[')?;
                write_separated(formatter, items)?;
                formatter.write_char(']')
            }
            Self::Map(map) => {
                formatter.write_char('{')?;
                for (index, (key, value)) in map.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{key:?}: {value}")?;
                }
                formatter.write_char('}')
            }
            Self::Placeholder => formatter.write_str("..."),
            Self::Function(function) => write!(formatter, "{function}"),
            Self::Applied(applied) => write!(formatter, "{applied}"),
            Self::Slot(slot) => write!(formatter, "{slot}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, formatter)
    }
}

impl Display for Applied {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let Some(_guard) = RecursionGuard::enter(self.identity()) else {
            return formatter.write_str(CYCLE_MARKER);
        };

        write!(formatter, "partial({}", self.target())?;
        for argument in self.left_args() {
            write!(formatter, ", {argument}")?;
        }
        formatter.write_str(", ...")?;
        for argument in self.right_args() {
            write!(formatter, ", {argument}")?;
        }
        for (name, value) in self.keywords() {
            write!(formatter, ", {name}={value}")?;
        }
        formatter.write_char(')')
    }
}

impl fmt::Debug for Applied {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, formatter)
    }
}

impl Display for Slot {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let Some(_guard) = RecursionGuard::enter(self.identity()) else {
            return formatter.write_str(CYCLE_MARKER);
        };
        // Clone out of the lock so rendering never holds it.
        let inner = self.get();
        write!(formatter, "Slot({inner})")
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, formatter)
    }
}
