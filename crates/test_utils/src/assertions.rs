//! Custom Test Assertions
//!
//! Assertion helpers for paged results and policy listings that print the
//! offending values on failure.

use core_kernel::Page;
use domain_insurance::InsurancePolicy;

/// Asserts the paging envelope of a result
///
/// # Panics
///
/// Panics if the item count, total, or page count differ from the expected values
pub fn assert_page_shape<T>(page: &Page<T>, items: usize, total_items: u64, total_pages: u64) {
    assert_eq!(
        page.items().len(),
        items,
        "Expected {} items on page, got {}",
        items,
        page.items().len()
    );
    assert_eq!(
        page.total_items(),
        total_items,
        "Expected {} total items, got {}",
        total_items,
        page.total_items()
    );
    assert_eq!(
        page.total_pages(),
        total_pages,
        "Expected {} total pages, got {}",
        total_pages,
        page.total_pages()
    );
}

/// Asserts that policies appear with exactly the given numbers, in order
pub fn assert_policy_numbers(policies: &[InsurancePolicy], expected: &[&str]) {
    let actual: Vec<&str> = policies.iter().map(|p| p.policy_number.as_str()).collect();
    assert_eq!(actual, expected, "Policy numbers out of expected order");
}

/// Asserts that every policy satisfies a predicate
pub fn assert_all_policies<F>(policies: &[InsurancePolicy], description: &str, predicate: F)
where
    F: Fn(&InsurancePolicy) -> bool,
{
    for policy in policies {
        assert!(
            predicate(policy),
            "Policy {} does not satisfy: {}",
            policy.policy_number,
            description
        );
    }
}
