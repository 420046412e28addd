//! Scope composition: how a dependency's scope combines with the scope of
//! the edge that pulled it in transitively.

use ferrovia_core::dependency::DependencyScope;

/// Compose a parent edge's scope with a dependency's own declared scope,
/// following Maven's scope-composition table. Returns `None` when the
/// combination is not carried forward at all (a `provided`/`test` child of
/// a `compile`/`runtime`/`provided`/`test` parent is dropped from the
/// transitive closure — it only ever matters directly at its own level).
pub fn compose(parent_scope: DependencyScope, dep_scope: DependencyScope) -> Option<DependencyScope> {
    use DependencyScope::*;
    match (parent_scope, dep_scope) {
        (_, System) => Some(System),
        (_, Import) => None,

        (Compile, Compile) => Some(Compile),
        (Compile, Runtime) => Some(Runtime),
        (Compile, Provided) => None,
        (Compile, Test) => None,

        (Runtime, Compile) => Some(Runtime),
        (Runtime, Runtime) => Some(Runtime),
        (Runtime, Provided) => None,
        (Runtime, Test) => None,

        (Provided, Compile) => Some(Provided),
        (Provided, Runtime) => Some(Provided),
        (Provided, Provided) => None,
        (Provided, Test) => None,

        (Test, Compile) => Some(Test),
        (Test, Runtime) => Some(Test),
        (Test, Provided) => None,
        (Test, Test) => None,

        (System, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DependencyScope::*;

    #[test]
    fn table_t1_compile_row() {
        assert_eq!(compose(Compile, Compile), Some(Compile));
        assert_eq!(compose(Compile, Runtime), Some(Runtime));
        assert_eq!(compose(Compile, Provided), None);
        assert_eq!(compose(Compile, Test), None);
        assert_eq!(compose(Compile, System), Some(System));
    }

    #[test]
    fn table_t1_runtime_row() {
        assert_eq!(compose(Runtime, Compile), Some(Runtime));
        assert_eq!(compose(Runtime, Runtime), Some(Runtime));
        assert_eq!(compose(Runtime, Provided), None);
        assert_eq!(compose(Runtime, Test), None);
    }

    #[test]
    fn table_t1_provided_row() {
        assert_eq!(compose(Provided, Compile), Some(Provided));
        assert_eq!(compose(Provided, Runtime), Some(Provided));
        assert_eq!(compose(Provided, Provided), None);
        assert_eq!(compose(Provided, Test), None);
    }

    #[test]
    fn table_t1_test_row() {
        assert_eq!(compose(Test, Compile), Some(Test));
        assert_eq!(compose(Test, Runtime), Some(Test));
        assert_eq!(compose(Test, Provided), None);
        assert_eq!(compose(Test, Test), None);
    }

    #[test]
    fn import_never_propagates() {
        assert_eq!(compose(Compile, Import), None);
    }

    #[test]
    fn system_always_propagates_as_system() {
        assert_eq!(compose(Test, System), Some(System));
        assert_eq!(compose(Provided, System), Some(System));
    }
}
