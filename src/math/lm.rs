//! Levenberg-Marquardt minimization of a sum-of-squares objective.
//!
//! The exponential and logistic fits minimize squared residuals between the
//! model and the observed counts. The solver here is the standard damped
//! Gauss-Newton iteration:
//!
//! - Jacobian by forward differences (the models are cheap to evaluate)
//! - step from the damped normal equations, solved by Cholesky with an SVD
//!   fallback for near-singular systems
//! - multiplicative damping update (accept: shrink, reject: grow)
//! - a hard iteration budget; exhausting it is a `Convergence` error, never
//!   a silent partial result
//!
//! At convergence the parameter covariance is estimated the way nonlinear
//! regression packages expose it: `s^2 * (J^T J)^-1` with
//! `s^2 = SSE / (n - p)`.

use nalgebra::{DMatrix, DVector};

use crate::error::{AppError, ErrorKind};

/// Knobs for the solver. Defaults are sized for 2-3 parameter growth models
/// over short daily series.
#[derive(Debug, Clone)]
pub struct LmOptions {
    /// Hard iteration budget.
    pub max_iters: usize,
    /// Relative SSE-reduction threshold for convergence.
    pub ftol: f64,
    /// Relative step-size threshold for convergence.
    pub xtol: f64,
    /// Initial damping factor.
    pub lambda_init: f64,
}

impl Default for LmOptions {
    fn default() -> Self {
        Self {
            max_iters: 500,
            ftol: 1e-12,
            xtol: 1e-10,
            lambda_init: 1e-3,
        }
    }
}

/// Converged solver state.
#[derive(Debug, Clone)]
pub struct LmFit {
    pub params: Vec<f64>,
    /// `s^2 * (J^T J)^-1` evaluated at the solution.
    pub covariance: DMatrix<f64>,
    pub sse: f64,
    pub iterations: usize,
}

/// Minimize `|residuals(params)|^2` starting from `guess`.
///
/// `residuals` maps a parameter vector to the residual vector (observed
/// minus predicted); its output length `n` must exceed the parameter count.
pub fn levenberg_marquardt<F>(
    residuals: F,
    guess: &[f64],
    opts: &LmOptions,
) -> Result<LmFit, AppError>
where
    F: Fn(&[f64]) -> DVector<f64>,
{
    let p = guess.len();
    if p == 0 {
        return Err(AppError::new(ErrorKind::InvalidConfig, "Empty initial guess."));
    }

    let mut params: Vec<f64> = guess.to_vec();
    let mut res = residuals(&params);
    let n = res.len();
    if n <= p {
        return Err(AppError::new(
            ErrorKind::InsufficientData,
            format!("Nonlinear fit needs n > p observations, got n={n}, p={p}."),
        ));
    }
    let mut sse = res.norm_squared();
    if !sse.is_finite() {
        return Err(AppError::new(
            ErrorKind::Numeric,
            "Initial guess produces non-finite residuals.",
        ));
    }

    let mut lambda = opts.lambda_init;
    let mut converged = false;
    let mut iterations = 0;

    while iterations < opts.max_iters {
        iterations += 1;

        let jac = forward_difference_jacobian(&residuals, &params, &res);
        let jtj = jac.transpose() * &jac;
        let jtr = jac.transpose() * &res;

        // Damped normal equations with Marquardt scaling: the damping term
        // is proportional to the diagonal of J^T J, which keeps the step
        // sensible when parameters differ by orders of magnitude (an
        // exponential rate vs a population ceiling).
        let mut damped = jtj.clone();
        for i in 0..p {
            let d = jtj[(i, i)].abs().max(1e-12);
            damped[(i, i)] += lambda * d;
        }

        let Some(step) = solve_symmetric(&damped, &jtr) else {
            lambda *= 10.0;
            if lambda > 1e14 {
                break;
            }
            continue;
        };

        // A negligible proposed step means we are already at a stationary
        // point (e.g. the seed was exact); declare convergence before
        // evaluating, so floating-point noise cannot reject us forever.
        let step_norm = step.norm();
        let param_norm = DVector::from_column_slice(&params).norm();
        if step_norm <= opts.xtol * (param_norm + opts.xtol) {
            converged = true;
            break;
        }

        let candidate: Vec<f64> = params
            .iter()
            .zip(step.iter())
            .map(|(&pi, &si)| pi - si)
            .collect();
        let cand_res = residuals(&candidate);
        let cand_sse = cand_res.norm_squared();

        // Non-strict acceptance: on exact-fit data the SSE sits at the
        // floating-point floor and a zero-reduction step still counts as
        // converged via the ftol test below.
        if cand_sse.is_finite() && cand_sse <= sse {
            let reduction = sse - cand_sse;

            params = candidate;
            res = cand_res;
            sse = cand_sse;
            // Shrink damping at the same rate rejection grows it, so a run
            // of accepted steps restores near-Gauss-Newton steps quickly
            // even after a badly scaled stretch drove lambda up.
            lambda = (lambda / 10.0).max(1e-14);

            if reduction <= opts.ftol * sse.max(opts.ftol) {
                converged = true;
                break;
            }
        } else {
            // Rejected step: increase damping and retry from the same point.
            lambda *= 10.0;
            if lambda > 1e14 {
                break;
            }
        }
    }

    if !converged {
        return Err(AppError::new(
            ErrorKind::Convergence,
            format!("Nonlinear optimizer did not converge within {} iterations.", opts.max_iters),
        ));
    }

    let covariance = covariance_at_solution(&residuals, &params, &res, sse, n, p)?;

    Ok(LmFit {
        params,
        covariance,
        sse,
        iterations,
    })
}

/// Forward-difference Jacobian of the residual vector.
fn forward_difference_jacobian<F>(residuals: &F, params: &[f64], base: &DVector<f64>) -> DMatrix<f64>
where
    F: Fn(&[f64]) -> DVector<f64>,
{
    // sqrt of machine epsilon, the usual forward-difference step scale.
    const EPS: f64 = 1.49e-8;

    let n = base.len();
    let p = params.len();
    let mut jac = DMatrix::<f64>::zeros(n, p);
    let mut bumped = params.to_vec();

    for j in 0..p {
        let h = EPS * params[j].abs().max(1.0);
        bumped[j] = params[j] + h;
        let shifted = residuals(&bumped);
        bumped[j] = params[j];

        for i in 0..n {
            jac[(i, j)] = (shifted[i] - base[i]) / h;
        }
    }

    jac
}

/// Solve the symmetric system `A x = b`, Cholesky first, SVD as fallback.
fn solve_symmetric(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    if let Some(chol) = a.clone().cholesky() {
        let x = chol.solve(b);
        if x.iter().all(|v| v.is_finite()) {
            return Some(x);
        }
    }

    // Near-singular damped systems: fall back to a tolerance-laddered SVD
    // solve, loosening until a finite solution is accepted.
    let svd = a.clone().svd(true, true);
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(x) = svd.solve(b, tol) {
            if x.iter().all(|v| v.is_finite()) {
                return Some(x);
            }
        }
    }

    None
}

fn covariance_at_solution<F>(
    residuals: &F,
    params: &[f64],
    res: &DVector<f64>,
    sse: f64,
    n: usize,
    p: usize,
) -> Result<DMatrix<f64>, AppError>
where
    F: Fn(&[f64]) -> DVector<f64>,
{
    let jac = forward_difference_jacobian(residuals, params, res);
    let jtj = jac.transpose() * &jac;

    let inv = jtj
        .clone()
        .try_inverse()
        .or_else(|| jtj.svd(true, true).pseudo_inverse(1e-12).ok())
        .ok_or_else(|| {
            AppError::new(
                ErrorKind::Numeric,
                "Singular J^T J at convergence; covariance unavailable.",
            )
        })?;

    let s2 = sse / (n - p) as f64;
    Ok(inv * s2)
}
