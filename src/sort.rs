//! Recursive insertion sort

/// Sorted copy of `list`
pub fn sort<T: PartialOrd + Clone>(list: &[T]) -> Vec<T> {
    match list.split_first() {
        Some((head, tail)) if !tail.is_empty() => insert(head.clone(), sort(tail)),
        _ => list.to_vec(),
    }
}

fn insert<T: PartialOrd + Clone>(elem: T, list: Vec<T>) -> Vec<T> {
    match list.iter().position(|x| elem <= *x) {
        Some(at) => {
            let mut out = list;
            out.insert(at, elem);
            out
        }
        None => {
            let mut out = list;
            out.push(elem);
            out
        }
    }
}

/// Same sort with the append bug in `insert`: an element that belongs in
/// front of the remaining list is appended to it instead.
pub fn sort_faulty<T: PartialOrd + Clone>(list: &[T]) -> Vec<T> {
    match list.split_first() {
        Some((head, tail)) if !tail.is_empty() => insert_faulty(head.clone(), &sort_faulty(tail)),
        _ => list.to_vec(),
    }
}

fn insert_faulty<T: PartialOrd + Clone>(elem: T, list: &[T]) -> Vec<T> {
    let Some((head, tail)) = list.split_first() else {
        return vec![elem];
    };
    if elem <= *head {
        let mut out = list.to_vec();
        out.push(elem);
        return out;
    }
    let mut out = vec![head.clone()];
    out.extend(insert_faulty(elem, tail));
    out
}
