/// Maze session: sizing, generation and click handling
pub mod executor;
/// Step-wise depth-first carving for both wall styles
pub mod generator;
/// Breadth-first distance field from a clicked cell
pub mod pavement;
/// Uniform index choice sources
pub mod selection;
