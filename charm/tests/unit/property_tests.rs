//! Property tests for hook-name dispatch.

use flannel_charm::cli::hook_from_argv0;
use flannel_charm::commands::hook::resolve;
use flannel_charm::domain::Hook;
use proptest::prelude::*;

fn any_hook() -> impl Strategy<Value = Hook> {
    prop::sample::select(Hook::ALL.to_vec())
}

proptest! {
    /// A hook symlink dispatches to its hook wherever the charm is deployed.
    #[test]
    fn prop_argv0_dispatch_ignores_directory(
        dir in "(/[a-z0-9_.-]{1,12}){0,6}",
        hook in any_hook(),
    ) {
        let argv0 = format!("{dir}/hooks/{hook}");
        prop_assert_eq!(hook_from_argv0(&argv0), Some(hook));
    }

    /// Only names of handled hooks resolve.
    #[test]
    fn prop_resolve_accepts_only_known_names(name in "[a-z-]{1,30}") {
        let known = Hook::ALL.iter().any(|h| h.to_string() == name);
        prop_assert_eq!(resolve(Some(&name), None).is_ok(), known);
    }

    /// An explicit name always wins over `JUJU_HOOK_NAME`.
    #[test]
    fn prop_explicit_name_wins(explicit in any_hook(), from_env in any_hook()) {
        let explicit_name = explicit.to_string();
        let env_name = from_env.to_string();
        prop_assert_eq!(resolve(Some(&explicit_name), Some(&env_name)), Ok(explicit));
    }
}
