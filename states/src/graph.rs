use std::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    fmt::{Debug, Formatter},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopologyError<T>
where
    T: Debug,
{
    #[error("Cycle detected in dependency graph, from {:?}", .0)]
    CycleDetected(DepRoute<T>),
    #[error("Duplicate edge detected in dependency graph, {:?}", .0)]
    DuplicateEdge(DepRoute<T>),
}

pub struct DepRoute<T> {
    // first is the start node, last is the end node
    route: Vec<T>,
}

impl<T> DepRoute<T> {
    pub fn nodes(&self) -> &[T] {
        &self.route
    }
}

impl<T> Debug for DepRoute<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Some((last, init)) = self.route.split_last() else {
            return write!(f, "[]");
        };
        for item in init {
            write!(f, "{item:?} -> ")?;
        }
        write!(f, "{last:?}")
    }
}

/// Directed dependency graph; an edge `from -> to` means `to` reads `from`.
#[derive(Debug)]
pub struct Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    routes: Vec<(Node, Node)>,
}

impl<Node> Default for Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Node> Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            routes: Vec::with_capacity(capacity),
        }
    }

    pub fn route_to(&mut self, from: Node, to: Node) {
        self.routes.push((from, to));
    }

    fn in_degrees(&self) -> BTreeMap<Node, usize> {
        let mut degrees = BTreeMap::<Node, usize>::new();

        for (from, to) in &self.routes {
            degrees.entry(*from).or_insert(0);
            *degrees.entry(*to).or_insert(0) += 1;
        }

        degrees
    }

    /// Kahn's algorithm. Returns every node that appears in an edge, each one
    /// after all of the nodes it depends on.
    pub fn topology_sort(&self) -> Result<Vec<Node>, TopologyError<Node>> {
        let mut degrees = self.in_degrees();
        let mut order = Vec::with_capacity(degrees.len());

        while !degrees.is_empty() {
            let Some(node) = degrees
                .iter()
                .find(|(_, degree)| **degree == 0)
                .map(|(node, _)| *node)
            else {
                let remaining: Vec<Node> = degrees.keys().copied().collect();
                let route = self.find_cycle(&remaining).unwrap_or_default();
                return Err(TopologyError::CycleDetected(DepRoute { route }));
            };

            degrees.remove(&node);
            order.push(node);

            for next in self.direct_connected_nodes(node)? {
                if let Some(degree) = degrees.get_mut(&next) {
                    *degree -= 1;
                }
            }
        }

        Ok(order)
    }

    fn find_cycle(&self, nodes: &[Node]) -> Option<Vec<Node>> {
        // Iterative DFS restricted to the nodes left over by the sort.
        let mut visited = BTreeSet::new();
        let mut path_set = BTreeSet::new();
        let mut path = Vec::new();
        let mut stack: Vec<(Node, std::vec::IntoIter<Node>)> = Vec::new();

        let neighbours = |node: Node| {
            self.direct_connected_nodes(node)
                .unwrap_or_default()
                .into_iter()
                .filter(|n| nodes.contains(n))
                .collect::<Vec<_>>()
                .into_iter()
        };

        for &start in nodes {
            if visited.contains(&start) {
                continue;
            }

            stack.push((start, neighbours(start)));
            visited.insert(start);
            path_set.insert(start);
            path.push(start);

            while let Some((current, iter)) = stack.last_mut() {
                if let Some(next) = iter.next() {
                    if path_set.contains(&next) {
                        let pos = path.iter().position(|&x| x == next)?;
                        let mut cycle = path.split_off(pos);
                        cycle.push(next);
                        return Some(cycle);
                    } else if visited.insert(next) {
                        path_set.insert(next);
                        path.push(next);
                        stack.push((next, neighbours(next)));
                    }
                } else {
                    let done = *current;
                    stack.pop();
                    path_set.remove(&done);
                    path.pop();
                }
            }
        }
        None
    }

    fn direct_connected_nodes(&self, node: Node) -> Result<BTreeSet<Node>, TopologyError<Node>> {
        let mut collected = BTreeSet::new();

        for (from, to) in &self.routes {
            if *from == node && !collected.insert(*to) {
                return Err(TopologyError::DuplicateEdge(DepRoute {
                    route: vec![node, *to],
                }));
            }
        }

        Ok(collected)
    }

    /// Every node that transitively depends on `node`.
    pub fn dependents(&self, node: Node) -> BTreeSet<Node> {
        let mut collected = BTreeSet::new();
        let mut queue = VecDeque::from([node]);

        while let Some(current) = queue.pop_front() {
            for (from, to) in &self.routes {
                // `insert` returning false also stops us from looping on a cycle
                if *from == current && collected.insert(*to) {
                    queue.push_back(*to);
                }
            }
        }

        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_sort_orders_dependencies_first() {
        let mut graph: Graph<u32> = Graph::with_capacity(3);
        graph.route_to(1, 2);
        graph.route_to(2, 3);
        graph.route_to(1, 3);

        let order = graph.topology_sort().expect("acyclic graph");
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn cycle_is_reported_with_its_route() {
        let mut graph: Graph<u32> = Graph::new();
        graph.route_to(1, 2);
        graph.route_to(2, 3);
        graph.route_to(3, 1);

        match graph.topology_sort() {
            Err(TopologyError::CycleDetected(route)) => {
                let text = TopologyError::CycleDetected(route).to_string();
                assert!(text.contains("Cycle detected"), "got {text}");
                assert!(text.contains("->"), "got {text}");
            }
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_edge_is_rejected() {
        let mut graph: Graph<u32> = Graph::new();
        graph.route_to(1, 2);
        graph.route_to(1, 2);

        match graph.topology_sort() {
            Err(TopologyError::DuplicateEdge(route)) => {
                assert_eq!(route.nodes(), &[1, 2]);
                assert_eq!(format!("{route:?}"), "1 -> 2");
            }
            other => panic!("expected a duplicate edge, got {other:?}"),
        }
    }

    #[test]
    fn dependents_are_transitive() {
        let mut graph: Graph<u32> = Graph::new();
        graph.route_to(1, 2);
        graph.route_to(2, 3);
        graph.route_to(4, 3);

        assert_eq!(graph.dependents(1), BTreeSet::from([2, 3]));
        assert_eq!(graph.dependents(4), BTreeSet::from([3]));
        assert!(graph.dependents(3).is_empty());
    }
}
