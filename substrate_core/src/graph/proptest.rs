//! Property-based tests for the concept graph using proptest.
//!
//! These check that:
//!
//! - Upsert followed by get returns exactly what was stored
//! - Re-upserting a concept replaces its connections instead of appending
//! - Path search terminates on arbitrary (cyclic) graphs
//! - Every returned path follows real edges and reports its true cost
//! - A path is found exactly when the target is reachable, with minimal cost
//! - Under a hop bound, the cheapest path within the bound is still found
