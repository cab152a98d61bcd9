/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

mod config;

use std::collections::HashMap;

use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};

use crate::dimension::STANDARD_DIMENSIONS;
use crate::signature::Term;
use crate::{Conversion, Dimension, SiPrefix, Unit, UnitDef, UnitError, UnitKind};

pub use config::{
    ConversionConfig, DerivedConfig, RegistryConfig, TermConfig, UnitConfig,
};

static GLOBAL: OnceCell<Registry> = OnceCell::new();
static STANDARD: Lazy<Registry> = Lazy::new(Registry::standard);

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct DimensionDef {
    pub name: String,
    pub primary: Option<Unit>,
}

/// Dimensions, units and conversion rules.
///
/// A registry is declared through a [`RegistryBuilder`], validated
/// once and read-only afterwards. Quantity operators use the
/// process-wide registry ([`Registry::global`]); every operation is
/// also available as a method for use with a private registry.
#[derive(Clone, Debug)]
pub struct Registry {
    dimensions: Vec<DimensionDef>,
    units: Vec<UnitDef>,
    conversions: HashMap<(u16, u16), Conversion>,
    names: HashMap<String, Unit>,
    symbols: HashMap<String, Unit>,
    angle_unit: Option<Unit>,
}

impl Registry {
    fn empty() -> Self {
        Registry {
            dimensions: Vec::new(),
            units: Vec::new(),
            conversions: HashMap::new(),
            names: HashMap::new(),
            symbols: HashMap::new(),
            angle_unit: None,
        }
    }

    /// The standard unit set.
    pub fn standard() -> Self {
        RegistryBuilder::standard().finish()
    }

    /// The process-wide registry. The standard unit set is installed
    /// on first use unless another registry was installed before.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(|| {
            log::debug!("installing the standard unit registry");
            Registry::standard()
        })
    }

    /// The registry used to render handles and signatures: the
    /// installed one, or the standard set when none is installed.
    /// Unlike [`Registry::global`], this never installs anything.
    pub fn current() -> &'static Registry {
        GLOBAL.get().unwrap_or(&STANDARD)
    }

    /// Make this the process-wide registry. Fails if a registry
    /// is already in place, including the standard one installed
    /// by an earlier call to [`Registry::global`].
    pub fn install(self) -> Result<&'static Registry, UnitError> {
        let mut installed = false;
        let registry = GLOBAL.get_or_init(|| {
            installed = true;
            self
        });
        match installed {
            true => {
                log::debug!(
                    "installed unit registry with {} units",
                    registry.units.len()
                );
                Ok(registry)
            }
            false => Err(UnitError::AlreadyInstalled),
        }
    }

    pub fn dimensions(&self) -> impl Iterator<Item = Dimension> + '_ {
        (0..self.dimensions.len()).map(|i| Dimension(i as u16))
    }

    pub fn dimension_name(&self, dimension: Dimension) -> Option<&str> {
        self.dimensions
            .get(dimension.id() as usize)
            .map(|d| d.name.as_str())
    }

    pub fn dimension_by_name(&self, name: &str) -> Option<Dimension> {
        self.dimensions
            .iter()
            .position(|d| d.name == name)
            .map(|i| Dimension(i as u16))
    }

    /// The primary unit of a dimension.
    pub fn primary(&self, dimension: Dimension) -> Option<Unit> {
        self.dimensions
            .get(dimension.id() as usize)
            .and_then(|d| d.primary)
    }

    pub fn units(&self) -> impl Iterator<Item = Unit> + '_ {
        (0..self.units.len()).map(|i| Unit::new(i as u16))
    }

    pub fn unit(&self, unit: Unit) -> Option<&UnitDef> {
        self.units.get(unit.id() as usize)
    }

    pub(crate) fn def(&self, unit: Unit) -> Result<&UnitDef, UnitError> {
        self.unit(unit)
            .ok_or_else(|| UnitError::UnknownUnit(format!("unit#{}", unit.id())))
    }

    pub fn dimension_of(&self, unit: Unit) -> Result<Dimension, UnitError> {
        Ok(self.def(unit)?.dimension)
    }

    /// Find a unit by name ("Meters"), qualified name
    /// ("Length::Meters") or symbol ("m").
    pub fn lookup(&self, name: &str) -> Option<Unit> {
        self.symbols
            .get(name)
            .or_else(|| self.names.get(name))
            .copied()
    }

    pub fn unit_by_symbol(&self, symbol: &str) -> Option<Unit> {
        self.symbols.get(symbol).copied()
    }

    pub fn unit_by_name(&self, name: &str) -> Option<Unit> {
        self.names.get(name).copied()
    }

    /// A declared conversion rule, without inversion or composition.
    pub fn declared(&self, from: Unit, to: Unit) -> Option<Conversion> {
        self.conversions.get(&(from.id(), to.id())).copied()
    }

    /// The unit trigonometric functions work in.
    pub fn angle_unit(&self) -> Option<Unit> {
        self.angle_unit
    }
}

/// Declaration API of a [`Registry`].
///
/// Declarations never fail on their own; conflicts are collected and
/// reported by [`RegistryBuilder::build`], which also checks that every
/// fundamental unit converts to the primary unit of its dimension and
/// that no derived unit is defined in terms of itself.
pub struct RegistryBuilder {
    registry: Registry,
    errors: Vec<UnitError>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// An empty registry.
    pub fn new() -> Self {
        RegistryBuilder {
            registry: Registry::empty(),
            errors: Vec::new(),
        }
    }

    /// Start from the standard unit set.
    pub fn standard() -> Self {
        let mut builder = Self::new();
        for (dim, name) in STANDARD_DIMENSIONS.iter() {
            let defined = builder.define_dimension(name);
            debug_assert_eq!(*dim, defined);
        }
        crate::units::register(&mut builder);
        builder
    }

    /// Access to lookups while declaring.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn define_dimension(&mut self, name: &str) -> Dimension {
        if let Some(dim) = self.registry.dimension_by_name(name) {
            self.errors.push(UnitError::MalformedSignature(format!(
                "dimension {} declared twice",
                name
            )));
            return dim;
        }
        self.registry.dimensions.push(DimensionDef {
            name: name.to_string(),
            primary: None,
        });
        Dimension(self.registry.dimensions.len() as u16 - 1)
    }

    /// Declare a fundamental unit.
    pub fn define_unit(
        &mut self,
        name: &str,
        symbol: &str,
        dimension: Dimension,
    ) -> Unit {
        self.push_unit(name, symbol, dimension, UnitKind::Fundamental)
    }

    /// Declare the primary unit of a dimension, the hub through
    /// which conversions between its other units are resolved.
    pub fn define_primary_unit(
        &mut self,
        name: &str,
        symbol: &str,
        dimension: Dimension,
    ) -> Unit {
        let unit = self.define_unit(name, symbol, dimension);
        match self.registry.primary(dimension) {
            Some(other) => {
                self.errors.push(UnitError::MalformedSignature(format!(
                    "{} has two primary units: {} and {}",
                    self.registry.dimension_name(dimension).unwrap_or("?"),
                    self.qualified(other),
                    self.qualified(unit)
                )));
            }
            None => {
                if let Some(def) =
                    self.registry.dimensions.get_mut(dimension.id() as usize)
                {
                    def.primary = Some(unit);
                }
            }
        }
        unit
    }

    /// Declare a unit as `coefficient` times the product of `terms`.
    pub fn define_derived_unit(
        &mut self,
        name: &str,
        symbol: &str,
        dimension: Dimension,
        coefficient: f64,
        terms: &[Term],
    ) -> Unit {
        self.push_unit(
            name,
            symbol,
            dimension,
            UnitKind::Derived {
                coefficient,
                terms: terms.to_vec(),
            },
        )
    }

    /// Replace the definition of a unit by a derived one. Allows
    /// definitions that refer to units declared later.
    pub fn set_derived_terms(
        &mut self,
        unit: Unit,
        coefficient: f64,
        terms: &[Term],
    ) {
        match self.registry.units.get_mut(unit.id() as usize) {
            Some(def) => {
                def.kind = UnitKind::Derived {
                    coefficient,
                    terms: terms.to_vec(),
                }
            }
            None => self
                .errors
                .push(UnitError::UnknownUnit(format!("unit#{}", unit.id()))),
        }
    }

    /// Declare `to = from * slope + offset`. A later declaration for
    /// the same pair replaces the earlier one.
    pub fn define_conversion(
        &mut self,
        from: Unit,
        to: Unit,
        slope: f64,
        offset: f64,
    ) {
        let conv = Conversion::affine(slope, offset);
        if let Some(old) =
            self.registry.conversions.insert((from.id(), to.id()), conv)
        {
            log::warn!(
                "conversion {} -> {} redeclared: {:?} replaces {:?}",
                self.qualified(from),
                self.qualified(to),
                conv,
                old
            );
        }
    }

    /// Declare the SI-prefixed variant of a fundamental unit
    /// ("Kilometers", "km") with its conversion to the base unit.
    pub fn define_si_prefixed(&mut self, base: Unit, prefix: SiPrefix) -> Unit {
        let (name, symbol, dimension) = match self.registry.unit(base) {
            Some(def) => (
                prefix.apply(&def.name),
                format!("{}{}", prefix.prefix(), def.symbol),
                def.dimension,
            ),
            None => {
                self.errors
                    .push(UnitError::UnknownUnit(format!("unit#{}", base.id())));
                return base;
            }
        };
        let unit = self.define_unit(&name, &symbol, dimension);
        self.define_conversion(unit, base, prefix.multiplier(), 0.0);
        unit
    }

    pub fn set_angle_unit(&mut self, unit: Unit) {
        self.registry.angle_unit = Some(unit);
    }

    /// Validate the declarations.
    pub fn build(self) -> Result<Registry, UnitError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }
        let registry = self.registry;
        registry.check_primaries()?;
        registry.check_derived()?;
        log::debug!(
            "built unit registry: {} dimensions, {} units, {} conversions",
            registry.dimensions.len(),
            registry.units.len(),
            registry.conversions.len()
        );
        Ok(registry)
    }

    /// The registry without validation, for the built-in unit set
    /// (which has its validation covered by tests).
    pub(crate) fn finish(self) -> Registry {
        self.registry
    }

    fn push_unit(
        &mut self,
        name: &str,
        symbol: &str,
        dimension: Dimension,
        kind: UnitKind,
    ) -> Unit {
        let unit = Unit::new(self.registry.units.len() as u16);
        let dim_name = match self.registry.dimension_name(dimension) {
            Some(n) => n.to_string(),
            None => {
                self.errors.push(UnitError::Config(format!(
                    "unit {} refers to undeclared dimension#{}",
                    name,
                    dimension.id()
                )));
                format!("dimension#{}", dimension.id())
            }
        };
        let qualified_name = format!("{}::{}", dim_name, name);

        for key in [name, qualified_name.as_str()] {
            if self.registry.names.insert(key.to_string(), unit).is_some() {
                self.errors.push(UnitError::MalformedSignature(format!(
                    "unit name {} declared twice",
                    key
                )));
            }
        }
        if self.registry.symbols.insert(symbol.to_string(), unit).is_some() {
            self.errors.push(UnitError::MalformedSignature(format!(
                "unit symbol {} declared twice",
                symbol
            )));
        }

        self.registry.units.push(UnitDef {
            name: name.to_string(),
            symbol: symbol.to_string(),
            dimension,
            kind,
            qualified_name,
        });
        unit
    }

    fn qualified(&self, unit: Unit) -> String {
        match self.registry.unit(unit) {
            Some(def) => def.qualified_name.clone(),
            None => format!("unit#{}", unit.id()),
        }
    }
}

impl Registry {
    /// Every fundamental unit must reach its primary unit in one step.
    fn check_primaries(&self) -> Result<(), UnitError> {
        for unit in self.units() {
            let def = &self.units[unit.id() as usize];
            if !def.is_fundamental() {
                continue;
            }
            let primary = self.primary(def.dimension).ok_or_else(|| {
                UnitError::MissingConversion(
                    def.qualified_name.clone(),
                    format!(
                        "{}::<primary>",
                        self.dimension_name(def.dimension).unwrap_or("?")
                    ),
                )
            })?;
            if primary.id() != unit.id()
                && self.declared(unit, primary).is_none()
                && self.declared(primary, unit).is_none()
            {
                return Err(UnitError::MissingConversion(
                    def.qualified_name.clone(),
                    self.units[primary.id() as usize].qualified_name.clone(),
                ));
            }
        }
        Ok(())
    }

    /// Derived units must refer to known units and must not
    /// (transitively) refer to themselves.
    fn check_derived(&self) -> Result<(), UnitError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            Active,
            Done,
        }

        let mut marks = vec![Mark::New; self.units.len()];
        for start in 0..self.units.len() {
            if marks[start] != Mark::New {
                continue;
            }
            /* Depth-first walk; a unit met again while still
             * active closes a cycle. */
            let mut stack = vec![(start, 0usize)];
            marks[start] = Mark::Active;
            while let Some((id, next)) = stack.pop() {
                let terms = match &self.units[id].kind {
                    UnitKind::Derived { terms, .. } => terms.as_slice(),
                    UnitKind::Fundamental => &[],
                };
                match terms.get(next) {
                    None => marks[id] = Mark::Done,
                    Some(term) => {
                        stack.push((id, next + 1));
                        let child = term.unit.id() as usize;
                        match marks.get(child) {
                            None => {
                                return Err(UnitError::UnknownUnit(format!(
                                    "unit#{} in the definition of {}",
                                    child, self.units[id].qualified_name
                                )))
                            }
                            Some(Mark::Active) => {
                                return Err(UnitError::MalformedSignature(
                                    format!(
                                        "cyclic definition of {}",
                                        self.units[child].qualified_name
                                    ),
                                ))
                            }
                            Some(Mark::Done) => {}
                            Some(Mark::New) => {
                                marks[child] = Mark::Active;
                                stack.push((child, 0));
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
