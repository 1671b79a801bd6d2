/// Generate accessors for fields of [`crate::global_state::Globals`].
///
/// Usage:
/// `global_signals! {
///     pub dashboard_state => dashboard: DashboardState,
///     log_lines => logs: Vec<String>,
/// }`
#[macro_export]
macro_rules! global_signals {
    ( $( $vis:vis $name:ident => $field:ident : $ty:ty ),+ $(,)? ) => {
        $(
            $vis fn $name() -> ::leptos::RwSignal<$ty> {
                $crate::global_state::globals().$field
            }
        )+
    };
}
