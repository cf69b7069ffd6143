/// A configuration option, with a name and a permitted range.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    /// The name of the option.
    pub name: &'static str,

    /// The minimum permitted value.
    pub min: T,

    /// The maximum permitted value.
    pub max: T,

    /// The current value.
    pub value: T,
}
