use super::*;

fn merge(current: Sampling, cur_int: bool, next: Sampling, next_int: bool) -> Option<Sampling> {
    let mut next = next;
    compatible_sampling(current, cur_int, &mut next, next_int).then_some(next)
}

#[test]
fn aniso_pairs_merge_to_larger_anisotropy() {
    assert_eq!(
        merge(
            Sampling::Aniso { max_aniso: 4 },
            false,
            Sampling::Aniso { max_aniso: 8 },
            false
        ),
        Some(Sampling::Aniso { max_aniso: 8 })
    );
}

#[test]
fn aniso_absorbs_linear_neighbors() {
    let aniso = Sampling::Aniso { max_aniso: 4 };
    assert_eq!(merge(aniso, false, Sampling::Linear, false), Some(aniso));
    assert_eq!(merge(Sampling::Linear, false, aniso, false), Some(aniso));
}

#[test]
fn cubic_absorbs_linear_and_identical_cubic() {
    let mitchell = Sampling::MITCHELL;
    assert_eq!(merge(mitchell, false, Sampling::Linear, false), Some(mitchell));
    assert_eq!(merge(Sampling::Linear, false, mitchell, false), Some(mitchell));
    assert_eq!(merge(mitchell, false, mitchell, false), Some(mitchell));
}

#[test]
fn distinct_cubics_do_not_merge() {
    assert_eq!(
        merge(Sampling::MITCHELL, false, Sampling::CATMULL_ROM, false),
        None
    );
}

#[test]
fn two_linears_collapse_to_one() {
    assert_eq!(
        merge(Sampling::Linear, false, Sampling::Linear, false),
        Some(Sampling::Linear)
    );
}

#[test]
fn nearest_merges_only_across_integer_translations() {
    // Next stage is nearest: fine when the current transform is an integer
    // translation (current sampling is the normalized default then).
    assert_eq!(
        merge(Sampling::Linear, true, Sampling::Nearest, false),
        Some(Sampling::Nearest)
    );
    assert_eq!(merge(Sampling::Linear, false, Sampling::Nearest, false), None);

    // Current stage is nearest: fine only when the next transform is an
    // integer translation, and the merged pass keeps nearest.
    assert_eq!(
        merge(Sampling::Nearest, false, Sampling::Linear, true),
        Some(Sampling::Nearest)
    );
    assert_eq!(merge(Sampling::Nearest, false, Sampling::Linear, false), None);
}

#[test]
fn aniso_next_to_cubic_is_incompatible() {
    assert_eq!(
        merge(Sampling::MITCHELL, false, Sampling::Aniso { max_aniso: 2 }, false),
        None
    );
    assert_eq!(
        merge(Sampling::Aniso { max_aniso: 2 }, false, Sampling::MITCHELL, false),
        None
    );
}
