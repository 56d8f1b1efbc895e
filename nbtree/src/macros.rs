/// Build a [`Compound`][crate::Compound] from `name => value` pairs. Values
/// are converted with `Into<Value>`. A repeated name keeps its first value.
///
/// ```
/// use nbtree::{compound, list, Value};
///
/// let c = compound! {
///     "id" => "minecraft:chest",
///     "Items" => list![compound! { "Slot" => 0i8, "Count" => 1i8 }],
///     "Lock" => "",
/// };
///
/// assert_eq!(c.len(), 3);
/// assert_eq!(c["id"], "minecraft:chest");
/// ```
#[macro_export]
macro_rules! compound {
    ($($name:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut compound = $crate::Compound::new();
        $(
            compound.set_if_absent($name, $crate::Value::from($value));
        )*
        compound
    }};
}

/// Build a [`List`][crate::List] from values. Values are converted with
/// `Into<Value>`, and are not checked to share a tag.
///
/// ```
/// use nbtree::{list, Tag};
///
/// let l = list![1.0f32, 2.0f32];
/// assert_eq!(l.kind(), Some(Tag::Float));
/// ```
#[macro_export]
macro_rules! list {
    ($($value:expr),* $(,)?) => {
        $crate::List::from_values(::std::vec![$($crate::Value::from($value)),*])
    };
}
