use std::collections::BTreeMap;
use std::rc::Rc;

use bough_lang_ast::*;
use bough_lang_printer::PrintToString;

use super::super::ctx::*;
use super::super::util::*;
use super::CheckInfer;
use crate::normalizer::Level;
use crate::result::{TcResult, TypeError};

// MapType
//
//

impl CheckInfer for MapType {
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let elem = check_later(ctx, span, &self.elem, &Term::TypeUniv, depth)?;
        Ok(annotated(MapType { elem: Rc::new(elem) }, Term::TypeUniv))
    }
}

// MapLit
//
//

fn check_entries(
    lit: &MapLit,
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    depth: Lvl,
    elem: &Term,
) -> TcResult<BTreeMap<u64, Term>> {
    let mut entries = BTreeMap::new();
    for (key, val) in &lit.entries {
        entries.insert(*key, val.check(ctx, span, depth, elem)?);
    }
    Ok(entries)
}

impl CheckInfer for MapLit {
    fn check(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl, t: &Term) -> TcResult<Term> {
        let Term::MapType(MapType { elem }) = ctx.whnf(Level::Full, t)? else {
            return check_by_inference(self, ctx, span, depth, t);
        };
        let default = self.default.check(ctx, span, depth, &elem)?;
        let entries = check_entries(self, ctx, span, depth, &elem)?;
        Ok(annotated(MapLit { entries, default: Rc::new(default) }, t.clone()))
    }

    /// The element type of a literal is the type of its default value.
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let default = self.default.infer(ctx, span, depth)?;
        let elem = type_of(&default)?;
        let entries = check_entries(self, ctx, span, depth, &elem)?;
        let out = MapLit { entries, default: Rc::new(default) };
        Ok(annotated(out, MapType { elem: Rc::new(elem) }.into()))
    }
}

/// The element type of the map `map` elaborated to.
fn elem_type(
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    map: &Term,
    term: &Term,
    depth: Lvl,
) -> TcResult<Term> {
    let typ = type_of(map)?;
    match ctx.whnf(Level::Full, &typ)? {
        Term::MapType(MapType { elem }) => Ok((*elem).clone()),
        _ => {
            let err = TypeError::ExpectedMap { got: typ.print_to_string(None), span: span.clone() };
            ctx.error(span, Term::reference("Map"), typ, term, depth, err)
        }
    }
}

/// Infer the body of a `get` or `put`, which binds the value found and the
/// resulting map.
fn infer_body(
    ctx: &mut Ctx,
    span: &Option<CodeSpan>,
    (got, name, body): (&Name, &Name, &Closure2),
    elem: &Term,
    depth: Lvl,
) -> TcResult<Term> {
    let got = bound_var(got, depth, elem.clone());
    let map = bound_var(name, depth + 1, MapType { elem: Rc::new(elem.clone()) }.into());
    body.apply(got, map).infer(ctx, span, depth + 2)
}

// Get
//
//

impl CheckInfer for Get {
    /// The rule for reading from a map is:
    /// ```text
    ///            B, Γ ⊢ m ⇒ Map A
    ///            B, Γ ⊢ k ⇐ U64
    ///            B, Γ, g: A, m: Map A ⊢ e ⇒ T
    ///           ──────────────────────────────────
    ///            B, Γ ⊢ get g = m[k] as m; e ⇒ T
    /// ```
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let Get { got, name, map, key, body } = self;
        let map_out = map.infer(ctx, span, depth)?;
        let elem = elem_type(ctx, span, &map_out, &self.clone().into(), depth)?;
        let key_out = key.check(ctx, span, depth, &Term::U64Type)?;
        let body_out = infer_body(ctx, span, (got, name, body), &elem, depth)?;
        let typ = type_of(&body_out)?;
        let out = Get {
            got: got.clone(),
            name: name.clone(),
            map: Rc::new(map_out),
            key: Rc::new(key_out),
            body: close2(depth, body_out),
        };
        Ok(annotated(out, typ))
    }
}

// Put
//
//

impl CheckInfer for Put {
    /// Like [Get], and the written value must have the element type.
    fn infer(&self, ctx: &mut Ctx, span: &Option<CodeSpan>, depth: Lvl) -> TcResult<Term> {
        let Put { got, name, map, key, val, body } = self;
        let map_out = map.infer(ctx, span, depth)?;
        let elem = elem_type(ctx, span, &map_out, &self.clone().into(), depth)?;
        let key_out = key.check(ctx, span, depth, &Term::U64Type)?;
        let val_out = val.check(ctx, span, depth, &elem)?;
        let body_out = infer_body(ctx, span, (got, name, body), &elem, depth)?;
        let typ = type_of(&body_out)?;
        let out = Put {
            got: got.clone(),
            name: name.clone(),
            map: Rc::new(map_out),
            key: Rc::new(key_out),
            val: Rc::new(val_out),
            body: close2(depth, body_out),
        };
        Ok(annotated(out, typ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::normalizer::Captured;

    fn ctx() -> Ctx {
        Ctx::new(Rc::new(Book::new())).with_output(Rc::new(Captured::new()))
    }

    fn map() -> Term {
        let entries = [(1, Term::Num(20)), (2, Term::Num(30))].into_iter().collect();
        MapLit { entries, default: Rc::new(Term::Num(0)) }.into()
    }

    fn get(map: Term, body: impl Fn(Term, Term) -> Term + 'static) -> Term {
        Get {
            got: "v".to_owned(),
            name: "m".to_owned(),
            map: Rc::new(map),
            key: Rc::new(Term::Num(1)),
            body: Closure2::new(body),
        }
        .into()
    }

    #[test]
    fn map_literal_has_map_type() {
        let out = map().infer(&mut ctx(), &None, 0).unwrap();
        assert!(matches!(
            type_of(&out).unwrap(),
            Term::MapType(MapType { elem }) if matches!(*elem, Term::U64Type)
        ));
    }

    #[test]
    fn map_entries_share_the_default_type() {
        let entries = [(1, Term::Flt(2.0))].into_iter().collect();
        let term: Term = MapLit { entries, default: Rc::new(Term::Num(0)) }.into();
        assert!(term.infer(&mut ctx(), &None, 0).is_err());
    }

    #[test]
    fn get_binds_element_and_map() {
        let out = get(map(), |v, _| v).infer(&mut ctx(), &None, 0).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::U64Type));
        let out = get(map(), |_, m| m).infer(&mut ctx(), &None, 0).unwrap();
        assert!(matches!(type_of(&out).unwrap(), Term::MapType(_)));
    }

    #[test]
    fn get_from_non_map() {
        let res = get(Term::Num(1), |v, _| v).infer(&mut ctx(), &None, 0);
        assert!(matches!(res.unwrap_err().as_type_error(), Some(TypeError::ExpectedMap { .. })));
    }

    #[test]
    fn put_checks_value() {
        let put = |val: Term| -> Term {
            Put {
                got: "v".to_owned(),
                name: "m".to_owned(),
                map: Rc::new(map()),
                key: Rc::new(Term::Num(3)),
                val: Rc::new(val),
                body: Closure2::new(|_, m| m),
            }
            .into()
        };
        assert!(put(Term::Num(4)).infer(&mut ctx(), &None, 0).is_ok());
        assert!(put(Term::Flt(4.0)).infer(&mut ctx(), &None, 0).is_err());
    }
}
