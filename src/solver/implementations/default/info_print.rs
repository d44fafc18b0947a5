#![allow(non_snake_case)]
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::algebra::*;
use std::io::Write;

use super::*;
use std::time::Duration;

impl<T> ConfigurablePrintTarget for DefaultInfo<T> {
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

macro_rules! expformat {
    ($fmt:expr,$val:expr) => {
        if $val.is_finite() {
            _exp_str_reformat(format!($fmt, $val))
        } else {
            format!($fmt, $val)
        }
    };
}

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    pub fn print_configuration(
        &mut self,
        settings: &DefaultSettings<T>,
        data: &ProblemData<T>,
        restart: &SupportedRestart<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;
        let set = settings;

        writeln!(out, "\nproblem: {}", data.label())?;
        writeln!(out, "  variables     = {}", data.nx)?;
        writeln!(out, "  constraints   = {}", data.ny)?;
        writeln!(out, "  nnz(A)        = {}", data.A.nnz())?;
        writeln!(out)?;

        writeln!(out, "settings:")?;
        writeln!(
            out,
            "  step size = {:.3e}, primal weight = {:.3e}, precision: {} bit",
            set.eta,
            set.w,
            _get_precision_string::<T>()
        )?;
        writeln!(
            out,
            "  max iter = {}, tol = {:.1e}, tol_kkt = {:.1e}",
            set.max_iter, set.tol, set.tol_kkt
        )?;
        write!(
            out,
            "  restarts: {}, method = {}",
            _bool_on_off(set.restart_enable),
            restart.name()
        )?;
        match restart.name() {
            "adaptive" => writeln!(
                out,
                ", every = {}, τ₀ = {}, β = {:.3}",
                set.evaluate_every, set.tau0, set.beta
            )?,
            "fixed" => writeln!(out, ", length = {}", set.restart_length)?,
            _ => writeln!(out)?,
        }
        writeln!(
            out,
            "  duality gap: {}, failure limit = {}",
            _bool_on_off(set.gap_enable),
            set.gap_failure_limit
        )?;
        writeln!(out)?;

        std::io::Result::Ok(())
    }

    pub fn print_status_header(&mut self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        //print a subheader for the iterations info
        write!(out, "iter      ")?;
        write!(out, "kkt       ")?;
        write!(out, "gap       ")?;
        write!(out, "obj          ")?;
        write!(out, "time      ")?;
        writeln!(out,)?;
        writeln!(out, "-------------------------------------------------------")?;
        out.flush()?;
        std::io::Result::Ok(())
    }

    /// One progress line for the current iterates.
    pub fn print_status(
        &mut self,
        settings: &DefaultSettings<T>,
        iterates: &Iterates<T>,
        data: &ProblemData<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let lap = self.lap();
        let out = &mut self.stream;
        let info = &iterates.info;

        write!(out, "{:>8}  ", iterates.step())?;
        write!(out, "{}  ", expformat!("{:6.2e}", info.kkt_error))?;
        match info.normalized_duality_gap {
            Some(gap) => write!(out, "{}  ", expformat!("{:6.2e}", gap))?,
            None => write!(out, " ------   ")?,
        }

        if iterates.layout.is_split() {
            let (U, V, y) = (iterates.x_u(), iterates.x_v(), iterates.y());
            write!(out, "{}  ", expformat!("{:+8.4e}", split_objective(U, V, y, data)))?;
            write!(out, "{:.2}s", lap)?;
            write!(
                out,
                "  |U| = {}, |V| = {}, |U-V| = {}, |y| = {}",
                expformat!("{:.2e}", U.norm()),
                expformat!("{:.2e}", V.norm()),
                expformat!("{:.2e}", U.dist(V)),
                expformat!("{:.2e}", y.norm())
            )?;
        } else {
            let obj = lagrangian(iterates.x(), iterates.y(), data);
            write!(out, "{}  ", expformat!("{:+8.4e}", obj))?;
            write!(out, "{:.2}s", lap)?;
        }

        writeln!(out,)?;

        std::io::Result::Ok(())
    }

    pub fn print_restart(
        &mut self,
        settings: &DefaultSettings<T>,
        iterates: &Iterates<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }
        writeln!(
            self.stream,
            "restart {} at iteration {} (epoch length {})",
            iterates.n + 1,
            iterates.step(),
            iterates.t
        )
    }

    pub fn print_warning(
        &mut self,
        settings: &DefaultSettings<T>,
        msg: &str,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }
        writeln!(self.stream, "warning: {msg}")
    }

    pub fn print_footer(&mut self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "-------------------------------------------------------")?;

        writeln!(out, "Terminated with status = {}", self.status)?;
        writeln!(
            out,
            "iterations = {}, restarts = {}, kkt = {}",
            self.iterations,
            self.restarts,
            expformat!("{:.2e}", self.last.kkt_error)
        )?;

        writeln!(
            out,
            "solve time = {:?}",
            Duration::from_secs_f64(self.solve_time)
        )?;

        std::io::Result::Ok(())
    }

    pub fn print_target(&mut self) -> &mut PrintTarget {
        &mut self.stream
    }
}

// cᵗx + bᵗy - yᵗAx
fn lagrangian<T: FloatT>(x: &[T], y: &[T], data: &ProblemData<T>) -> T {
    let mut Ax = vec![T::zero(); data.ny];
    data.A.gemv(&mut Ax, x, T::one(), T::zero());
    data.c.dot(x) + data.b.dot(y) - y.dot(&Ax)
}

// cᵗV - yᵗ(AU - b)
fn split_objective<T: FloatT>(U: &[T], V: &[T], y: &[T], data: &ProblemData<T>) -> T {
    let mut r = data.b.clone();
    data.A.gemv(&mut r, U, T::one(), -T::one());
    data.c.dot(V) - y.dot(&r)
}

fn _bool_on_off(v: bool) -> &'static str {
    match v {
        true => "on",
        false => "off",
    }
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}

// convert a string in LowerExp display format into one that
// 1) always has a sign after the exponent, and
// 2) has at least two digits in the exponent.

fn _exp_str_reformat(mut thestr: String) -> String {
    let Some(eidx) = thestr.find('e') else {
        return thestr;
    };
    let has_sign = thestr[eidx + 1..].starts_with('-');

    let has_short_exp = {
        if !has_sign {
            thestr.len() == eidx + 2
        } else {
            thestr.len() == eidx + 3
        }
    };

    let chars = match (has_sign, has_short_exp) {
        (false, true) => "+0",
        (false, false) => "+",
        (true, true) => "0",
        (true, false) => "",
    };

    let shift = if has_sign { 2 } else { 1 };
    thestr.insert_str(eidx + shift, chars);
    thestr
}

#[test]
fn test_exp_str_reformat() {
    assert_eq!(_exp_str_reformat(format!("{:.2e}", 1.5e-3)), "1.50e-03");
    assert_eq!(_exp_str_reformat(format!("{:.2e}", 1.5e3)), "1.50e+03");
    assert_eq!(_exp_str_reformat(format!("{:.1e}", 2e-12)), "2.0e-12");
    assert_eq!(_exp_str_reformat(format!("{:.1e}", 2e12)), "2.0e+12");
}

#[test]
fn test_print_status_lines() {
    let data = ProblemData::<f64>::example_lp();
    let mut settings = DefaultSettings::<f64>::default();
    let mut info = DefaultInfo::<f64>::new();
    info.print_to_buffer();

    let mut iterates = Iterates::new(data.nx, data.ny);
    iterates.info = ConvergenceInfo::new(0.25, None);

    // nothing is written unless verbose
    info.print_status(&settings, &iterates, &data).unwrap();
    assert!(info.get_print_buffer().unwrap().is_empty());

    settings.verbose = true;
    info.print_status(&settings, &iterates, &data).unwrap();
    info.print_warning(&settings, "gap disabled").unwrap();
    let text = info.get_print_buffer().unwrap();
    assert!(text.contains("2.50e-01"));
    assert!(text.contains(" ------ "));
    assert!(text.contains("warning: gap disabled"));
}
