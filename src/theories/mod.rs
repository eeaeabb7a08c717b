/*!
Theory solvers: plug-ins that constrain non-Boolean structure (finite domains, menus, floats)
on top of the Boolean core, coordinated per §4.4.
*/

pub mod coordinator;
pub mod finite_domain;
pub mod float;
pub mod menu;

pub use coordinator::Coordinator;
