/// Provides the weighted forced-neighbor path search.
///
/// You most likely want to start with one of the following:
/// - [Searcher::find_single_path](crate::algorithms::searcher::Searcher::find_single_path)
/// - [Searcher::find_all_paths](crate::algorithms::searcher::Searcher::find_all_paths)
pub mod searcher;

/// Provides pathfinding using Dijkstra's Shortest Paths algorithm,
/// mainly as a brute-force reference to check search results against
pub mod dijkstra;
