//! Built-in control types.
//!
//! | `ui` | Type | Element |
//! |---|---|---|
//! | `input` | [`Input`] | `<input type="{input_type}">` |
//! | `text_input` | [`TextInput`] | `<input type="text">` |
//! | `number_input` | [`NumberInput`] | `<input type="number">` |
//! | `checkbox_input` | [`CheckboxInput`] | `<input type="checkbox">` |
//! | `hidden_input` | [`HiddenInput`] | `<input type="hidden">` |
//! | `submit_input` | [`SubmitInput`] | `<input type="submit">` |
//! | `select` | [`Select`] | `<select>` |
//! | `textarea` | [`Textarea`] | `<textarea>` |
//! | `display_text` | [`DisplayText`] | filtered markup |

pub mod display_text;
pub mod input;
pub mod select;
pub mod textarea;

pub use display_text::{DisplayText, DisplayTextElement};
pub use input::{
    CheckboxInput, HiddenInput, Input, InputElement, InputKind, NumberInput, SubmitInput,
    TextInput,
};
pub use select::{OptionValues, Select, SelectElement};
pub use textarea::Textarea;
