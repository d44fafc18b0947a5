// package together all of the following and re-export
// in a partially flattened structure :
// : collaborator traits
// : user settings
// : solver status

pub mod traits;

//partially flatten top level pieces

mod settings;
mod solver;
pub use settings::*;
pub use solver::*;
