// crates/shelter-gate-core/src/core/capability.rs
// ============================================================================
// Module: Shelter Gate Capabilities
// Description: Closed capability namespace and ordered capability sets.
// Purpose: Replace free-form permission strings with compile-time checked names.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every discrete admin action is named by exactly one [`Capability`]. The
//! backend still speaks in strings (`permisos`), so each variant carries a
//! single wire name. Parsing is exact and case-sensitive: `crearproducto` is
//! not `CrearProducto`, and unknown names never become capabilities.
//!
//! ## Invariants
//! - Wire names are unique across variants.
//! - [`Capability::ALL`] lists every variant exactly once.
//! - The namespace is flat; there is no prefix or hierarchical matching.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;

// ============================================================================
// SECTION: Capability
// ============================================================================

/// A single grantable admin capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// List pets in the admin catalog.
    ListarMascotas,
    /// Register a new pet.
    CrearMascota,
    /// Edit a pet record.
    EditarMascota,
    /// Delete a pet record.
    EliminarMascota,
    /// List inventory products.
    ListarProductos,
    /// Create an inventory product.
    CrearProducto,
    /// Edit an inventory product.
    EditarProducto,
    /// Delete an inventory product.
    EliminarProducto,
    /// List product categories.
    ListarCategorias,
    /// Create a product category.
    CrearCategoria,
    /// Edit a product category.
    EditarCategoria,
    /// Delete a product category.
    EliminarCategoria,
    /// List roles.
    ListarRoles,
    /// Create a role.
    CrearRol,
    /// Edit a role.
    EditarRol,
    /// Delete a role.
    EliminarRol,
    /// Assign permissions to roles.
    AsignarPermisos,
    /// List staff members.
    ListarFuncionarios,
    /// Register a staff member.
    CrearFuncionario,
    /// Review adoption requests.
    SolicitudesAdopcion,
    /// View dashboard reports.
    VerReportes,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Self; 21] = [
        Self::ListarMascotas,
        Self::CrearMascota,
        Self::EditarMascota,
        Self::EliminarMascota,
        Self::ListarProductos,
        Self::CrearProducto,
        Self::EditarProducto,
        Self::EliminarProducto,
        Self::ListarCategorias,
        Self::CrearCategoria,
        Self::EditarCategoria,
        Self::EliminarCategoria,
        Self::ListarRoles,
        Self::CrearRol,
        Self::EditarRol,
        Self::EliminarRol,
        Self::AsignarPermisos,
        Self::ListarFuncionarios,
        Self::CrearFuncionario,
        Self::SolicitudesAdopcion,
        Self::VerReportes,
    ];

    /// Returns the backend wire name for this capability.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListarMascotas => "ListarMascotas",
            Self::CrearMascota => "CrearMascota",
            Self::EditarMascota => "EditarMascota",
            Self::EliminarMascota => "EliminarMascota",
            Self::ListarProductos => "ListarProductos",
            Self::CrearProducto => "CrearProducto",
            Self::EditarProducto => "EditarProducto",
            Self::EliminarProducto => "EliminarProducto",
            Self::ListarCategorias => "ListarCategorias",
            Self::CrearCategoria => "CrearCategoria",
            Self::EditarCategoria => "EditarCategoria",
            Self::EliminarCategoria => "EliminarCategoria",
            Self::ListarRoles => "ListarRoles",
            Self::CrearRol => "CrearRol",
            Self::EditarRol => "EditarRol",
            Self::EliminarRol => "EliminarRol",
            Self::AsignarPermisos => "AsignarPermisos",
            Self::ListarFuncionarios => "ListarFuncionarios",
            Self::CrearFuncionario => "CrearFuncionario",
            Self::SolicitudesAdopcion => "solicitudes-adopcion",
            Self::VerReportes => "VerReportes",
        }
    }

    /// Parses a wire name. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|capability| capability.as_str() == name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Capability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse(&name).ok_or_else(|| D::Error::custom(format!("unknown capability: {name}")))
    }
}

// ============================================================================
// SECTION: Capability Set
// ============================================================================

/// Ordered set of granted capabilities.
///
/// An empty set is a valid snapshot and means "no extra capabilities".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// Creates an empty capability set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns true when the capability is granted.
    #[must_use]
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Grants a capability. Returns false when it was already present.
    pub fn insert(&mut self, capability: Capability) -> bool {
        self.0.insert(capability)
    }

    /// Returns the number of granted capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when nothing is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over granted capabilities in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    /// Builds a set from backend wire names.
    ///
    /// Returns the set together with the names that matched no capability,
    /// in input order and without duplicates.
    #[must_use]
    pub fn from_wire_names<I, S>(names: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        let mut unrecognized: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref();
            match Capability::parse(name) {
                Some(capability) => {
                    set.insert(capability);
                }
                None => {
                    if !unrecognized.iter().any(|seen| seen == name) {
                        unrecognized.push(name.to_string());
                    }
                }
            }
        }
        (set, unrecognized)
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Capability; N]> for CapabilitySet {
    fn from(value: [Capability; N]) -> Self {
        value.into_iter().collect()
    }
}
