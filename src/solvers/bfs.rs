/// Right, down, left, up.
pub(super) fn neighbors(node: usize, width: usize) -> [Option<usize>; 4] {
    [
        node.checked_add(1),
        node.checked_add(width),
        node.checked_sub(1),
        node.checked_sub(width),
    ]
}
