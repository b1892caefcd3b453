//! Default-route interface detection from `route` output.

/// Return the interface of the first default route in `route` output.
///
/// `route` prints a header followed by one row per route:
///
/// ```text
/// Kernel IP routing table
/// Destination     Gateway         Genmask         Flags Metric Ref    Use Iface
/// default         10.0.0.1        0.0.0.0         UG    0      0        0 eth0
/// ```
///
/// The destination column must read `default`; the interface is the last
/// column. Returns `None` when no such row exists.
#[must_use]
pub fn default_interface(route_output: &str) -> Option<String> {
    route_output.lines().find_map(|line| {
        let mut cols = line.split_whitespace();
        if cols.next() != Some("default") {
            return None;
        }
        // A bare "default" row has no interface column.
        cols.last().map(str::to_string)
    })
}
