//! Module hints: narrow the search surface from words in the query
//!
//! When the query mentions an entity type ("booking", "pagos", "equipo"...)
//! only the matching modules are searched. Without any hint every permitted
//! module is searched.

use std::collections::BTreeSet;

use super::types::{Module, PermissionSet};

/// Alias substrings per module, pre-normalized (lowercase, no diacritics)
///
/// English and Spanish product vocabulary. Aliases are matched as substrings
/// of the normalized query, so "reserva" also covers "reservas" and
/// "reservation".
pub const MODULE_ALIASES: &[(Module, &[&str])] = &[
    (
        Module::Properties,
        &["propiedad", "property", "properties", "inmueble", "alojamiento", "listing", "recurso"],
    ),
    (Module::Leads, &["lead", "prospect", "interesad", "inquiry", "inquiries"]),
    (Module::Reservations, &["reserva", "booking", "checkin", "check-in"]),
    (Module::Payments, &["pago", "payment", "cobro", "factura", "invoice"]),
    (Module::Reviews, &["review", "resena", "opinion", "valoracion"]),
    (Module::Team, &["equipo", "team", "staff", "empleado", "employee"]),
    (Module::Clients, &["client", "customer", "huesped"]),
    (Module::Profile, &["perfil", "profile"]),
    (Module::Preferences, &["preferencia", "preference", "ajustes", "settings"]),
];

/// Endings an alias may carry and still count as the alias word itself
///
/// Plurals and the "-tion"/"-cion" forms, so "reservas", "reservation" and
/// "reservaciones" are alias words while "leadbetter" or "pagoda" are not.
const ALIAS_SUFFIXES: &[&str] = &[
    "", "s", "es", "a", "as", "o", "os", "e", "tion", "tions", "cion", "ciones",
];

/// Token is an alias, possibly inflected, rather than a word that merely contains one
fn is_alias_form(token: &str, aliases: &[&str]) -> bool {
    aliases.iter().any(|alias| {
        token
            .strip_prefix(alias)
            .is_some_and(|rest| ALIAS_SUFFIXES.contains(&rest))
    })
}

/// Which modules a query should reach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHintPlan {
    /// No alias matched: search everything the caller may see
    pub is_broad_search: bool,
    pub matched_modules: BTreeSet<Module>,
    /// Query with alias words removed; scored against in narrow mode
    pub residual_query: String,
}

impl ModuleHintPlan {
    /// Module is searched under this plan (permissions aside)
    pub fn in_scope(&self, module: Module) -> bool {
        self.is_broad_search || self.matched_modules.contains(&module)
    }

    /// Module is searched under this plan and the caller may see it
    pub fn should_search(&self, module: Module, permissions: &PermissionSet) -> bool {
        permissions.allows(module) && self.in_scope(module)
    }

    /// Text the per-module scorers compare against
    ///
    /// In narrow mode an empty residual means "list the module", which the
    /// scorer treats as match-all.
    pub fn scoring_query<'a>(&'a self, normalized_query: &'a str) -> &'a str {
        if self.is_broad_search {
            normalized_query
        } else {
            &self.residual_query
        }
    }
}

/// Build the plan for an already normalized query
pub fn detect_plan(normalized_query: &str) -> ModuleHintPlan {
    let mut matched_modules = BTreeSet::new();
    let mut matched_aliases: Vec<&str> = Vec::new();

    for (module, aliases) in MODULE_ALIASES {
        for alias in aliases.iter().filter(|a| normalized_query.contains(**a)) {
            matched_modules.insert(*module);
            matched_aliases.push(*alias);
        }
    }

    if matched_modules.is_empty() {
        return ModuleHintPlan {
            is_broad_search: true,
            matched_modules,
            residual_query: normalized_query.to_string(),
        };
    }

    let residual_query = normalized_query
        .split_whitespace()
        .filter(|token| !is_alias_form(token, &matched_aliases))
        .collect::<Vec<_>>()
        .join(" ");

    tracing::debug!(
        modules = ?matched_modules,
        residual = %residual_query,
        "Query narrowed by module hints"
    );

    ModuleHintPlan {
        is_broad_search: false,
        matched_modules,
        residual_query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::normalize::normalize;

    #[test]
    fn test_no_alias_is_broad() {
        let plan = detect_plan("juan");
        assert!(plan.is_broad_search);
        assert!(plan.matched_modules.is_empty());
        assert!(Module::ALL.iter().all(|m| plan.in_scope(*m)));
        assert_eq!(plan.scoring_query("juan"), "juan");
    }

    #[test]
    fn test_booking_narrows_to_reservations() {
        let plan = detect_plan("booking");
        assert!(!plan.is_broad_search);
        assert_eq!(
            plan.matched_modules.iter().copied().collect::<Vec<_>>(),
            vec![Module::Reservations]
        );
        assert_eq!(plan.residual_query, "");
    }

    #[test]
    fn test_residual_keeps_non_alias_tokens() {
        let plan = detect_plan(&normalize("Reservas Juan Pérez"));
        assert!(plan.in_scope(Module::Reservations));
        assert!(!plan.in_scope(Module::Leads));
        assert_eq!(plan.scoring_query("reservas juan perez"), "juan perez");
    }

    #[test]
    fn test_inflected_alias_words_are_stripped() {
        for query in ["reservas", "reservation", "reservaciones", "bookings", "leads", "clientes"] {
            let plan = detect_plan(query);
            assert!(!plan.is_broad_search, "{query}");
            assert_eq!(plan.residual_query, "", "{query}");
        }
    }

    #[test]
    fn test_words_containing_an_alias_stay_in_residual() {
        let plan = detect_plan(&normalize("Leadbetter"));
        assert!(plan.in_scope(Module::Leads));
        assert_eq!(plan.scoring_query("leadbetter"), "leadbetter");

        let plan = detect_plan("pagoda roja");
        assert!(plan.in_scope(Module::Payments));
        assert_eq!(plan.residual_query, "pagoda roja");

        let plan = detect_plan("steam");
        assert_eq!(plan.residual_query, "steam");
    }

    #[test]
    fn test_accented_alias_matches_after_normalization() {
        let plan = detect_plan(&normalize("reseñas"));
        assert_eq!(
            plan.matched_modules.into_iter().collect::<Vec<_>>(),
            vec![Module::Reviews]
        );
    }

    #[test]
    fn test_multiple_modules() {
        let plan = detect_plan("pagos clientes");
        assert!(plan.in_scope(Module::Payments));
        assert!(plan.in_scope(Module::Clients));
        assert!(!plan.in_scope(Module::Team));
    }

    #[test]
    fn test_should_search_respects_permissions() {
        let plan = detect_plan("booking");
        let perms = PermissionSet::all().deny(Module::Reservations);
        assert!(!plan.should_search(Module::Reservations, &perms));
    }

    #[test]
    fn test_numeric_query_is_broad() {
        assert!(detect_plan("12345").is_broad_search);
    }

    #[test]
    fn test_aliases_are_normalized() {
        for (_, aliases) in MODULE_ALIASES {
            for alias in *aliases {
                assert_eq!(normalize(alias), *alias);
            }
        }
    }
}
