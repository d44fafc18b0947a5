use crate::{algebra::*, solver::core::SettingsError};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Restart schemes accepted by the `restart_method` setting
pub const RESTART_METHODS: [&str; 3] = ["none", "adaptive", "fixed"];

/// Standard solver settings for the restarted PDHG method.
///
/// Construct with [`DefaultSettingsBuilder`], which fills every field
/// not explicitly set with the default listed below and validates the result.

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefaultSettings<T: FloatT> {
    ///PDHG step size η
    #[builder(default = "(0.1).as_T()")]
    pub eta: T,

    ///primal weight ω
    #[builder(default = "T::one()")]
    pub w: T,

    ///normalized duality gap tolerance
    #[builder(default = "(1e-7).as_T()")]
    pub tol: T,

    ///KKT residual tolerance, used once the duality gap has been disabled by failures
    #[builder(default = "(1e-7).as_T()")]
    pub tol_kkt: T,

    ///maximum number of iterations
    #[builder(default = "500000")]
    pub max_iter: u32,

    ///allow restarts of the averaged iterate
    #[builder(default = "true")]
    pub restart_enable: bool,

    ///restart scheme ("none", "adaptive" or "fixed")
    #[builder(default = r#""none".to_string()"#)]
    pub restart_method: String,

    ///iterations between restarts for the "fixed" scheme
    #[builder(default = "1024")]
    pub restart_length: u32,

    ///iterations between checks of the "adaptive" restart criterion
    #[builder(default = "30")]
    pub evaluate_every: u32,

    ///iterations between trajectory records
    #[builder(default = "30")]
    pub record_every: u32,

    ///iterations between progress lines
    #[builder(default = "100")]
    pub print_every: u32,

    ///minimum epoch length before the first adaptive restart
    #[builder(default = "1")]
    pub tau0: u32,

    ///sufficient decay factor for an adaptive restart
    #[builder(default = "(-T::one()).exp()")]
    pub beta: T,

    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,

    ///compute the normalized duality gap during convergence checks
    #[builder(default = "false")]
    pub gap_enable: bool,

    ///consecutive gap failures tolerated before the gap is disabled
    #[builder(default = "3")]
    pub gap_failure_limit: u32,

    ///dataset index, names the output directory of unnamed problems
    #[builder(default = "0")]
    pub dataset_idx: u32,
}

impl<T> Default for DefaultSettings<T>
where
    T: FloatT,
{
    fn default() -> DefaultSettings<T> {
        DefaultSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> DefaultSettings<T>
where
    T: FloatT,
{
    /// Checks that all settings hold legal values.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_positive(self.eta, "eta")?;
        validate_positive(self.w, "w")?;
        validate_positive(self.tol, "tol")?;
        validate_positive(self.tol_kkt, "tol_kkt")?;
        validate_beta(self.beta)?;
        validate_restart_method(&self.restart_method)?;

        for (value, name) in [
            (self.restart_length, "restart_length"),
            (self.evaluate_every, "evaluate_every"),
            (self.record_every, "record_every"),
            (self.print_every, "print_every"),
        ] {
            validate_cadence(value, name)?;
        }
        Ok(())
    }

    /// Number of trajectory records needed to cover `max_iter` iterations
    pub fn record_capacity(&self) -> usize {
        let (max_iter, every) = (self.max_iter as usize, self.record_every as usize);
        (max_iter + every - 1) / every
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for DefaultSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        DefaultSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> DefaultSettingsBuilder<T>
where
    T: FloatT,
{
    /// check any fields that were explicitly set
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(eta) = self.eta {
            validate_positive(eta, "eta")?;
        }
        if let Some(w) = self.w {
            validate_positive(w, "w")?;
        }
        if let Some(tol) = self.tol {
            validate_positive(tol, "tol")?;
        }
        if let Some(tol_kkt) = self.tol_kkt {
            validate_positive(tol_kkt, "tol_kkt")?;
        }
        if let Some(beta) = self.beta {
            validate_beta(beta)?;
        }
        if let Some(ref restart_method) = self.restart_method {
            validate_restart_method(restart_method)?;
        }

        for (value, name) in [
            (self.restart_length, "restart_length"),
            (self.evaluate_every, "evaluate_every"),
            (self.record_every, "record_every"),
            (self.print_every, "print_every"),
        ] {
            if let Some(value) = value {
                validate_cadence(value, name)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_positive<T: FloatT>(value: T, name: &'static str) -> Result<(), SettingsError> {
    if value.is_finite() && value > T::zero() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(name))
    }
}

fn validate_beta<T: FloatT>(beta: T) -> Result<(), SettingsError> {
    if beta > T::zero() && beta < T::one() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("beta"))
    }
}

fn validate_cadence(value: u32, name: &'static str) -> Result<(), SettingsError> {
    if value == 0 {
        Err(SettingsError::BadFieldValue(name))
    } else {
        Ok(())
    }
}

fn validate_restart_method(restart_method: &str) -> Result<(), SettingsError> {
    if RESTART_METHODS.contains(&restart_method) {
        Ok(())
    } else {
        Err(SettingsError::UnknownRestartMethod(restart_method.to_string()))
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings should pass
    assert!(DefaultSettings::<f64>::default().validate().is_ok());

    // fail on a bad restart method
    let mut settings = DefaultSettings::<f64>::default();
    settings.restart_method = "sometimes".to_string();
    assert_eq!(
        settings.validate(),
        Err(SettingsError::UnknownRestartMethod("sometimes".to_string()))
    );

    // fail on zero cadences
    let mut settings = DefaultSettings::<f64>::default();
    settings.record_every = 0;
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadFieldValue("record_every"))
    );
}

#[test]
fn test_settings_builder() {
    let settings = DefaultSettingsBuilder::<f64>::default()
        .max_iter(95)
        .record_every(10)
        .restart_method("fixed".to_string())
        .build()
        .unwrap();
    assert_eq!(settings.record_capacity(), 10);
    assert_eq!(settings.restart_length, 1024);
    assert!((settings.beta - (-1f64).exp()).abs() < 1e-15);

    // the builder rejects illegal values when they are set
    assert!(DefaultSettingsBuilder::<f64>::default()
        .beta(1.5)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .eta(-0.1)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .restart_method("never".to_string())
        .build()
        .is_err());
}
