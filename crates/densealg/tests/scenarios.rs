use anyhow::Result;
use densealg::config::{approx_equal, ApproxOptions};
use densealg::convert::{double, from_complex, single, to_complex};
use densealg::prelude::*;
use densealg::product::{
    dot, kronecker, matrix_times_vector, multiply, norm1, norm2, norm_inf, optimise_mult, outer,
};
use densealg::ContainerError;
use num_complex::{Complex32, Complex64};

#[test]
fn test_cond_sign_of_difference() -> Result<()> {
    let a = Vector::from_vec(vec![1.0, 2.0, 3.0]);
    let b = Vector::scalar(2.0);
    let out = cond(
        &a,
        &b,
        &Vector::scalar(-1.0),
        &Vector::scalar(0.0),
        &Vector::scalar(1.0),
    )?;
    assert_eq!(out.to_vec(), vec![-1.0, 0.0, 1.0]);
    Ok(())
}

#[test]
fn test_outer_product_scenario() -> Result<()> {
    let u = Vector::from_vec(vec![1.0, 2.0, 3.0]);
    let v = Vector::from_vec(vec![5.0, 2.0, 3.0]);
    let o = outer(&u, &v);
    let expected = Matrix::from_rows(&[[5.0, 2.0, 3.0], [10.0, 4.0, 6.0], [15.0, 6.0, 9.0]])?;
    assert_eq!(o, expected);
    // outer(u, v) is the product of a column and a row
    assert_eq!(multiply(&Matrix::as_column(&u), &Matrix::as_row(&v))?, o);
    Ok(())
}

#[test]
fn test_step_on_complex_is_unsupported() {
    let z = Vector::from_vec(vec![Complex64::new(1.0, 1.0)]);
    let err = z.step().unwrap_err();
    assert_eq!(
        err,
        ContainerError::UnsupportedOperation {
            op: "step",
            kind: ElementKind::C64
        }
    );
    assert!(err.to_string().contains("complex64"));
}

#[test]
fn test_add_length_mismatch() {
    let a = Vector::from_vec(vec![1.0f32, 2.0, 3.0]);
    let b = Vector::from_vec(vec![1.0f32, 2.0, 3.0, 4.0]);
    assert!(matches!(
        a.add(&b),
        Err(ContainerError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_linear_solve_residual_by_hand() -> Result<()> {
    // x = [1, -1] solves [[2, 1], [1, 3]] x = [1, -2]
    let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]])?;
    let x = Vector::from_vec(vec![1.0, -1.0]);
    let b = matrix_times_vector(&a, &x)?;
    assert_eq!(b.to_vec(), vec![1.0, -2.0]);
    assert_eq!(dot(&x, &b)?, 3.0);
    Ok(())
}

#[test]
fn test_norms_of_complex_vector() {
    let z = Vector::from_vec(vec![Complex64::new(3.0, 4.0), Complex64::new(0.0, -1.0)]);
    assert_eq!(norm1(&z), 6.0);
    assert_eq!(norm_inf(&z), 5.0);
    assert!((norm2(&z) - 26.0f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_kronecker_with_identity_is_block_diagonal() -> Result<()> {
    let i2 = Matrix::<f64>::ident(2)?;
    let b = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
    let k = kronecker(&i2, &b)?;
    assert_eq!(k.shape(), (4, 4));
    assert_eq!(k.row(1)?.to_vec(), vec![3.0, 4.0, 0.0, 0.0]);
    assert_eq!(k.row(2)?.to_vec(), vec![0.0, 0.0, 1.0, 2.0]);
    Ok(())
}

#[test]
fn test_chain_product_agrees_with_left_fold() -> Result<()> {
    let a = Matrix::from_rows(&[[1.0, 2.0, 3.0]])?;
    let b = Matrix::from_rows(&[[1.0], [0.0], [-1.0]])?;
    let c = Matrix::from_rows(&[[2.0, 5.0]])?;
    let chained = optimise_mult(&[a.clone(), b.clone(), c.clone()])?;
    let folded = multiply(&multiply(&a, &b)?, &c)?;
    assert!(approx_equal(&chained, &folded, &ApproxOptions::default()));
    assert_eq!(chained.shape(), (1, 2));
    assert_eq!(chained.as_slice(), &[-4.0, -10.0]);
    Ok(())
}

#[test]
fn test_complex_round_trip_through_precision() -> Result<()> {
    let re = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
    let im = Matrix::from_rows(&[[0.5, 0.0], [-0.5, 1.0]])?;
    let z = to_complex(&re, &im)?;
    let narrowed: Matrix<Complex32> = single(&z);
    let widened: Matrix<Complex64> = double(&narrowed);
    let (r, i) = from_complex(&widened);
    assert_eq!(r, re);
    assert_eq!(i, im);
    Ok(())
}

fn check_scale_then_sum<E: Element>() {
    let v = Vector::from_vec(vec![E::from_f64(1.0), E::from_f64(2.0), E::from_f64(3.0)]);
    let scaled = v.scale(E::from_f64(2.0));
    assert_eq!(scaled.sum_elements(), E::from_f64(12.0));
    assert_eq!(scaled.max_index().unwrap(), 2);
}

densealg::element_tests!(test_scale_then_sum, check_scale_then_sum);
