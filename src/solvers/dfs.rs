/// Up, left, down, right: the reverse of the breadth-first order, since the last neighbor
/// pushed onto the stack is the first one explored.
pub(super) fn neighbors(node: usize, width: usize) -> [Option<usize>; 4] {
    [
        node.checked_sub(width),
        node.checked_sub(1),
        node.checked_add(width),
        node.checked_add(1),
    ]
}
