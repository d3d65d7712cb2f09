use assert_approx_eq::assert_approx_eq;
use strata::{Decimals, Decompose, Error, Kind, Matrix};

const TOL: f64 = 1e-10;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_matrix_near(a: &Matrix<f64>, b: &Matrix<f64>, tol: f64) {
    assert_eq!(a.size(), b.size());
    for (ra, rb) in a.to_rows().iter().zip(b.to_rows().iter()) {
        for (&x, &y) in ra.iter().zip(rb.iter()) {
            assert_approx_eq!(x, y, tol);
        }
    }
}

fn general() -> Matrix<f64> {
    Matrix::<f64>::from_rows(&[
        [4.0, -2.0, 1.0, 3.0],
        [3.0, 6.0, -4.0, 2.0],
        [2.0, 1.0, 8.0, -5.0],
        [1.0, 3.0, 2.0, 7.0],
    ])
    .unwrap()
}

fn spd() -> Matrix<f64> {
    Matrix::<f64>::from_rows(&[[7.0, 1.0, 2.0], [1.0, 3.0, 4.0], [2.0, 4.0, 9.0]]).unwrap()
}

// ---------------------------------------------------------------------------
// LU
// ---------------------------------------------------------------------------

#[test]
fn lu_reconstructs() {
    init_logger();
    let a = general();
    let lu = a.lu().unwrap();
    assert_eq!(lu.l().kind(), Kind::LowerTriangular);
    assert_eq!(lu.u().kind(), Kind::UpperTriangular);
    assert_matrix_near(&lu.l().multiply(lu.u()).unwrap(), &a, TOL);
    assert_approx_eq!(lu.det(), 2440.0, 1e-8);
    assert_approx_eq!(a.det().unwrap(), 2440.0, 1e-8);
}

#[test]
fn lu_zero_pivot_is_not_finite() {
    init_logger();
    let a = Matrix::<f64>::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
    let lu = a.lu().unwrap();
    assert!(lu.u().to_rows().iter().flatten().any(|x| !x.is_finite()));
    // Pivoting recovers.
    assert_approx_eq!(a.lup().unwrap().det(), -1.0, TOL);
}

#[test]
fn lu_of_structured_input() {
    let u = Matrix::<f64>::upper_triangular(&[[2.0, 1.0], [0.0, 3.0]]).unwrap();
    let lu = u.lu().unwrap();
    assert_eq!(lu.l().kind(), Kind::Identity);
    assert_eq!(lu.u(), &u);
    assert_eq!(lu.factors().len(), 2);

    let wide = Matrix::<f64>::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
    assert_eq!(wide.lu().unwrap_err(), Error::NotSquare { rows: 1, cols: 3 });
}

// ---------------------------------------------------------------------------
// LUP
// ---------------------------------------------------------------------------

#[test]
fn lup_reconstructs_permuted() {
    init_logger();
    let a = general();
    let lup = a.lup().unwrap();
    let pa = lup.p().multiply(&a).unwrap();
    let lu = lup.l().multiply(lup.u()).unwrap();
    assert_matrix_near(&pa, &lu, TOL);
    assert_approx_eq!(lup.det(), 2440.0, 1e-8);

    let mut perm = lup.permutation().to_vec();
    perm.sort_unstable();
    assert_eq!(perm, vec![0, 1, 2, 3]);
}

#[test]
fn lup_without_swaps_has_identity_p() {
    let a = Matrix::<f64>::from_rows(&[[4.0, 1.0], [2.0, 3.0]]).unwrap();
    let lup = a.lup().unwrap();
    assert_eq!(lup.p().kind(), Kind::Identity);
    assert_eq!(lup.factors().len(), 3);
}

#[test]
fn lup_solve_and_inverse() {
    let a = general();
    let b = [1.0, -2.0, 3.0, 0.5];
    let x = a.solve(&b).unwrap();
    let back = a.multiply(&strata::Vector::<f64>::new(x).unwrap().to_matrix()).unwrap();
    for (i, &bi) in b.iter().enumerate() {
        assert_approx_eq!(back.get(i, 0).unwrap(), bi, TOL);
    }

    let inv = a.lup().unwrap().inverse().unwrap();
    assert_matrix_near(&inv, &a.inverse().unwrap(), TOL);
}

#[test]
fn lup_singular() {
    let a = Matrix::<f64>::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
    let lup = a.lup().unwrap();
    assert_eq!(lup.det(), 0.0);
    assert_eq!(lup.solve(&[1.0, 1.0]).unwrap_err(), Error::NotInvertible);
    assert_eq!(a.inverse().unwrap_err(), Error::NotInvertible);
    assert_eq!(a.rank(), 1);
}

#[test]
fn singular_by_rounding_is_not_invertible() {
    let a = Matrix::<f64>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();
    assert_eq!(a.rank(), 2);
    assert_eq!(a.inverse().unwrap_err(), Error::NotInvertible);
    assert_eq!(a.lup().unwrap().inverse().unwrap_err(), Error::NotInvertible);
    assert_eq!(a.solve(&[1.0, 2.0, 3.0]).unwrap_err(), Error::NotInvertible);
}

// ---------------------------------------------------------------------------
// Cholesky
// ---------------------------------------------------------------------------

#[test]
fn cholesky_reconstructs() {
    let a = spd();
    let chol = a.cholesky().unwrap();
    assert_eq!(chol.l().kind(), Kind::LowerTriangular);
    assert_eq!(chol.lt().kind(), Kind::UpperTriangular);
    assert_matrix_near(&chol.l().multiply(&chol.lt()).unwrap(), &a, TOL);
    assert_approx_eq!(chol.det(), a.det().unwrap(), 1e-9);
    assert_matrix_near(&chol.inverse().unwrap(), &a.inverse().unwrap(), TOL);

    let x = chol.solve(&[1.0, 2.0, 3.0]).unwrap();
    let y = a.solve(&[1.0, 2.0, 3.0]).unwrap();
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        assert_approx_eq!(xi, yi, TOL);
    }
}

#[test]
fn cholesky_failures() {
    let not_sym = Matrix::<f64>::from_rows(&[[4.0, 1.0], [2.0, 3.0]]).unwrap();
    assert_eq!(not_sym.cholesky().unwrap_err(), Error::NotSymmetric);

    let indefinite = Matrix::<f64>::from_rows(&[[1.0, 2.0], [2.0, 1.0]]).unwrap();
    assert!(matches!(
        indefinite.cholesky(),
        Err(Error::DecompositionNotPossible(_))
    ));

    let zero_diag = Matrix::<f64>::from_rows(&[[0.0, 1.0], [1.0, 2.0]]).unwrap();
    assert!(matches!(
        zero_diag.cholesky(),
        Err(Error::DecompositionNotPossible(_))
    ));

    let wide = Matrix::<f64>::from_rows(&[[1.0, 0.0, 0.0]]).unwrap();
    assert_eq!(wide.cholesky().unwrap_err(), Error::NotSquare { rows: 1, cols: 3 });
}

#[test]
fn cholesky_of_diagonal() {
    let d = Matrix::<f64>::diagonal(vec![4.0, 9.0]).unwrap();
    let chol = d.cholesky().unwrap();
    assert_eq!(chol.l().kind(), Kind::Diagonal);
    assert_eq!(chol.l().main_diagonal(), vec![2.0, 3.0]);
    assert_eq!(Matrix::<f64>::identity(3).unwrap().cholesky().unwrap().l().kind(), Kind::Identity);
}

// ---------------------------------------------------------------------------
// Square-only operations
// ---------------------------------------------------------------------------

#[test]
fn trace_det_rank() {
    let a = general();
    assert_eq!(a.trace().unwrap(), 25.0);
    assert_eq!(a.rank(), 4);
    assert_eq!(a.det_rounded(Decimals::Two).unwrap(), 2440.0);

    let strict = Matrix::<f64>::upper_triangular(&[[0.0, 1.0], [0.0, 0.0]]).unwrap();
    assert_eq!(strict.rank(), 1);
    assert_eq!(Matrix::<f64>::null(3, 3).unwrap().rank(), 0);
    assert_eq!(Matrix::<f64>::identity(5).unwrap().rank(), 5);
}

#[test]
fn powers() {
    let a = Matrix::<f64>::from_rows(&[[1.0, 1.0], [0.0, 1.0]]).unwrap();
    let a3 = a.power(3).unwrap();
    assert_eq!(a3.to_rows(), vec![vec![1.0, 3.0], vec![0.0, 1.0]]);
    assert_eq!(a.power(0).unwrap().kind(), Kind::Identity);
    assert_matrix_near(&a.power(-2).unwrap(), &Matrix::<f64>::from_rows(&[[1.0, -2.0], [0.0, 1.0]]).unwrap(), TOL);

    let singular = Matrix::<f64>::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
    assert_eq!(singular.power(-1).unwrap_err(), Error::NotInvertible);
}

#[test]
fn divide_is_multiply_by_inverse() {
    let a = general();
    let b = a.transpose();
    let q = a.divide(&b).unwrap();
    assert_matrix_near(&q.multiply(&b).unwrap(), &a, 1e-9);
}

#[test]
fn decompositions_are_debug_printable() {
    let a = spd();
    assert!(format!("{:?}", a.lu().unwrap()).starts_with("LuDecomposition"));
    assert!(format!("{:?}", a.lup().unwrap()).starts_with("LupDecomposition"));
    assert!(format!("{:?}", a.cholesky().unwrap()).starts_with("CholeskyDecomposition"));
}
