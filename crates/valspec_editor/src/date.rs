//! Editor for date values.
//!
//! A date field holds either an absolute date literal or one of a small set
//! of relative-date functions such as `today()` or
//! `adjust(today(), -1, DAYS)`. Absolute text is validated against the
//! field's date type before it is stored.

use std::fmt;

use valspec_codec::date::{is_date, is_date_time, is_strict_date};
use valspec_foundation::{
    Error, Literal, PrimitiveInstanceValue, PrimitiveType, Result, SimpleFunctionExpression, Type,
    ValueSpecification,
};

use crate::host::EditorHost;

/// Label shown for a `LatestDate` value.
pub const LATEST_DATE_LABEL: &str = "Latest Date";

/// Relative-date functions a date field can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateFunction {
    /// The current date.
    Today,
    /// The current date and time.
    Now,
    /// Monday of the current week.
    FirstDayOfThisWeek,
    /// First day of the current month.
    FirstDayOfThisMonth,
    /// First day of the current quarter.
    FirstDayOfThisQuarter,
    /// First day of the current year.
    FirstDayOfThisYear,
    /// The last given weekday strictly before today.
    PreviousDayOfWeek,
    /// The last given weekday, today included.
    MostRecentDayOfWeek,
    /// A date shifted by an amount of a duration unit.
    Adjust,
}

impl DateFunction {
    /// All functions, in menu order.
    pub const ALL: [Self; 9] = [
        Self::Today,
        Self::Now,
        Self::FirstDayOfThisWeek,
        Self::FirstDayOfThisMonth,
        Self::FirstDayOfThisQuarter,
        Self::FirstDayOfThisYear,
        Self::PreviousDayOfWeek,
        Self::MostRecentDayOfWeek,
        Self::Adjust,
    ];

    /// Returns the function name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Now => "now",
            Self::FirstDayOfThisWeek => "firstDayOfThisWeek",
            Self::FirstDayOfThisMonth => "firstDayOfThisMonth",
            Self::FirstDayOfThisQuarter => "firstDayOfThisQuarter",
            Self::FirstDayOfThisYear => "firstDayOfThisYear",
            Self::PreviousDayOfWeek => "previousDayOfWeek",
            Self::MostRecentDayOfWeek => "mostRecentDayOfWeek",
            Self::Adjust => "adjust",
        }
    }

    /// Looks up a function by its unqualified name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Returns the number of parameters the function takes.
    ///
    /// The weekday functions take a day of week; `adjust` takes a date, an
    /// amount and a duration unit.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::PreviousDayOfWeek | Self::MostRecentDayOfWeek => 1,
            Self::Adjust => 3,
            _ => 0,
        }
    }

    /// Returns the date type the function produces.
    #[must_use]
    pub const fn return_type(self) -> PrimitiveType {
        match self {
            Self::Now => PrimitiveType::DateTime,
            Self::Adjust => PrimitiveType::Date,
            _ => PrimitiveType::StrictDate,
        }
    }

    /// Recognizes a supported application of a relative-date function.
    ///
    /// The name may be package-qualified. The argument count must match, and
    /// the date shifted by `adjust` must itself be a date literal or a
    /// supported function.
    #[must_use]
    pub fn of(expression: &SimpleFunctionExpression) -> Option<Self> {
        let function = Self::from_name(expression.short_name())?;
        if expression.parameters.len() != function.arity() {
            return None;
        }
        if function == Self::Adjust {
            let supported_base = match expression.parameters[0].unwrap_propagated() {
                ValueSpecification::Primitive(p) => p.ty.is_date(),
                ValueSpecification::Function(f) => Self::of(f).is_some(),
                _ => false,
            };
            if !supported_base {
                return None;
            }
        }
        Some(function)
    }

    /// Builds an application of this function.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` if the number of parameters is wrong.
    pub fn apply(self, parameters: Vec<ValueSpecification>) -> Result<SimpleFunctionExpression> {
        if parameters.len() != self.arity() {
            return Err(Error::unsupported(format!(
                "{} expects {} parameter(s), got {}",
                self.name(),
                self.arity(),
                parameters.len()
            )));
        }
        Ok(SimpleFunctionExpression::new(self.name(), parameters)
            .with_return_type(self.return_type().into()))
    }
}

impl fmt::Display for DateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a date field currently holds.
#[derive(Clone, Debug, PartialEq)]
pub enum DateValue {
    /// A date literal.
    Absolute(PrimitiveInstanceValue),
    /// A relative-date function application.
    Relative(SimpleFunctionExpression),
}

impl From<DateValue> for ValueSpecification {
    fn from(value: DateValue) -> Self {
        match value {
            DateValue::Absolute(p) => Self::Primitive(p),
            DateValue::Relative(f) => Self::Function(f),
        }
    }
}

/// Date picker for one of the date primitive types.
#[derive(Clone, Debug)]
pub struct DateEditor {
    value: DateValue,
    ty: PrimitiveType,
}

impl DateEditor {
    /// Creates an editor for a field of date type `ty`.
    #[must_use]
    pub fn new(value: DateValue, ty: PrimitiveType) -> Self {
        Self { value, ty }
    }

    /// Returns the held value.
    #[must_use]
    pub fn value(&self) -> &DateValue {
        &self.value
    }

    /// Consumes the editor, returning the held value.
    #[must_use]
    pub fn into_value(self) -> DateValue {
        self.value
    }

    /// Returns the field's date type.
    #[must_use]
    pub fn date_type(&self) -> PrimitiveType {
        self.ty
    }

    /// Returns the relative function currently held, if any.
    #[must_use]
    pub fn relative(&self) -> Option<DateFunction> {
        match &self.value {
            DateValue::Relative(f) => DateFunction::of(f),
            DateValue::Absolute(_) => None,
        }
    }

    /// Returns the text shown in the field.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.value {
            DateValue::Absolute(p) if p.ty == PrimitiveType::LatestDate => {
                LATEST_DATE_LABEL.to_string()
            }
            DateValue::Absolute(p) => p
                .value()
                .and_then(Literal::as_str)
                .unwrap_or_default()
                .to_string(),
            DateValue::Relative(f) => ValueSpecification::Function(f.clone()).to_string(),
        }
    }

    /// Returns false for an absolute value that does not hold a date.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match &self.value {
            DateValue::Absolute(p) => p.ty == PrimitiveType::LatestDate || p.is_valid(),
            DateValue::Relative(_) => true,
        }
    }

    /// Stores an absolute date typed or picked by the user.
    ///
    /// A `Date` field stores a `StrictDate` for a bare date and a `DateTime`
    /// when a time part is present.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the text is not a date of the field's type,
    /// or `Unsupported` for a `LatestDate` field. The value is left untouched.
    pub fn set_absolute(&mut self, text: &str, host: &mut dyn EditorHost) -> Result<()> {
        let text = text.trim();
        let stored_type = match self.ty {
            PrimitiveType::StrictDate if is_strict_date(text) => PrimitiveType::StrictDate,
            PrimitiveType::DateTime if is_date_time(text) => PrimitiveType::DateTime,
            PrimitiveType::Date if is_strict_date(text) => PrimitiveType::StrictDate,
            PrimitiveType::Date if is_date(text) => PrimitiveType::DateTime,
            PrimitiveType::LatestDate => {
                return Err(Error::unsupported("LatestDate has no absolute value"));
            }
            ty => return Err(Error::invalid_value(Type::Primitive(ty), text)),
        };
        self.write(DateValue::Absolute(PrimitiveInstanceValue::with_value(
            stored_type,
            Literal::Date(text.to_string()),
        )));
        self.notify(host);
        Ok(())
    }

    /// Stores the latest available business date.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` unless the field is a `Date` or `LatestDate`.
    pub fn set_latest(&mut self, host: &mut dyn EditorHost) -> Result<()> {
        if !PrimitiveType::LatestDate.is_sub_type_of(self.ty) {
            return Err(Error::type_mismatch(
                self.ty.into(),
                PrimitiveType::LatestDate.into(),
            ));
        }
        self.write(DateValue::Absolute(PrimitiveInstanceValue::new(
            PrimitiveType::LatestDate,
        )));
        self.notify(host);
        Ok(())
    }

    /// Switches the field to a relative-date function.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` if the number of parameters is wrong, or
    /// `TypeMismatch` if the function's result does not fit the field type.
    pub fn set_relative(
        &mut self,
        function: DateFunction,
        parameters: Vec<ValueSpecification>,
        host: &mut dyn EditorHost,
    ) -> Result<()> {
        let produced = function.return_type();
        if !produced.is_sub_type_of(self.ty) {
            return Err(Error::type_mismatch(self.ty.into(), produced.into()));
        }
        let expression = function.apply(parameters)?;
        self.write(DateValue::Relative(expression));
        self.notify(host);
        Ok(())
    }

    /// Asks the host to reset the value.
    pub fn reset(&mut self, host: &mut dyn EditorHost) {
        host.reset_value();
    }

    fn write(&mut self, value: DateValue) {
        tracing::debug!(date_type = %self.ty, "date value changed");
        self.value = value;
    }

    fn notify(&self, host: &mut dyn EditorHost) {
        host.value_changed(&self.value.clone().into());
    }
}
