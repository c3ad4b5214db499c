mod box_position;
mod box_topology;

pub use box_position::BoxPosition;
pub use box_topology::BoxTopology;
