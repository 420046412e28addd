pub mod ops_add;
pub mod ops_fetch;
pub mod ops_lock;
pub mod ops_outdated;
pub mod ops_remove;
pub mod ops_tree;
pub mod ops_update;
